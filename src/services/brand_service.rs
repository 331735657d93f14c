// src/services/brand_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BrandRepository, QuotaRepository},
    models::{brand::Brand, rbac::BrandRole},
};

#[derive(Clone)]
pub struct BrandService {
    brand_repo: BrandRepository,
    quota_repo: QuotaRepository,
    pool: PgPool,
}

impl BrandService {
    pub fn new(brand_repo: BrandRepository, quota_repo: QuotaRepository, pool: PgPool) -> Self {
        Self { brand_repo, quota_repo, pool }
    }

    /// Cria a marca e, atomicamente, torna o criador o primeiro owner e
    /// semeia as cotas padrão. Tudo ou nada.
    pub async fn create_brand_with_owner(
        &self,
        name: &str,
        slug: Option<&str>,
        owner_id: Uuid,
    ) -> Result<Brand, AppError> {
        let slug = match slug {
            Some(s) => {
                let s = slugify(s);
                if s.is_empty() {
                    return Err(AppError::InvalidInput("Slug inválido.".into()));
                }
                s
            }
            None => {
                let s = slugify(name);
                if s.is_empty() {
                    return Err(AppError::InvalidInput(
                        "Não foi possível derivar um slug do nome.".into(),
                    ));
                }
                s
            }
        };

        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria a marca
        let brand = self.brand_repo.create_brand(&mut *tx, name, &slug).await?;

        // 3. O criador entra como owner
        self.brand_repo
            .add_member(&mut *tx, brand.id, owner_id, BrandRole::Owner.as_str())
            .await?;

        // 4. Cotas padrão
        self.quota_repo.seed_defaults(&mut *tx, brand.id).await?;

        // 5. Commit
        tx.commit().await?;

        Ok(brand)
    }
}

// Deriva um slug estável: minúsculas, [a-z0-9-], hifens colapsados.
fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut last_dash = true; // suprime hífen inicial

    for c in raw.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_derivado_do_nome() {
        assert_eq!(slugify("Acme Studio"), "acme-studio");
        assert_eq!(slugify("  Nova!! Marca 2026  "), "nova-marca-2026");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Já-Pronto"), "j-pronto");
    }
}

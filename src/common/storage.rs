// src/common/storage.rs

use uuid::Uuid;

use crate::common::error::AppError;

// Teto de upload aceito pela API.
pub const MAX_UPLOAD_BYTES: i64 = 10 * 1024 * 1024;

// Tipos de conteúdo aceitos para materiais de marca.
const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/svg+xml",
    "image/webp",
    "text/plain",
    "text/markdown",
];

// Categorias de objeto no bucket. Cada categoria é um segmento fixo do
// caminho, sempre prefixado pelo brand_id (isolamento por tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Guidelines,
    Logos,
    Assets,
}

impl AssetCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "guidelines" => Some(AssetCategory::Guidelines),
            "logos" => Some(AssetCategory::Logos),
            "assets" => Some(AssetCategory::Assets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Guidelines => "guidelines",
            AssetCategory::Logos => "logos",
            AssetCategory::Assets => "assets",
        }
    }
}

/// Remove separadores de caminho e caracteres de controle do nome do
/// arquivo. O resultado nunca escapa do prefixo `{brand_id}/{categoria}/`.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // ".." residual também não pode sobreviver.
    let cleaned = cleaned.replace("..", "_");
    let trimmed = cleaned.trim().trim_matches('.');

    if trimmed.is_empty() {
        "arquivo".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Valida um upload antes de qualquer chamada externa: presença do nome,
/// tipo permitido e tamanho dentro do teto. Primeira falha vence.
pub fn validate_upload(
    filename: Option<&str>,
    content_type: &str,
    size_bytes: i64,
) -> Result<(), AppError> {
    let filename = filename.unwrap_or("").trim();
    if filename.is_empty() {
        return Err(AppError::MissingFile);
    }

    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(AppError::InvalidFileType(content_type.to_string()));
    }

    if size_bytes <= 0 {
        return Err(AppError::MissingFile);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge { size: size_bytes, limit: MAX_UPLOAD_BYTES });
    }

    Ok(())
}

/// Caminho do objeto no bucket: `{brand_id}/{categoria}/{arquivo}`.
pub fn object_path(brand_id: Uuid, category: AssetCategory, filename: &str) -> String {
    format!("{}/{}/{}", brand_id, category.as_str(), sanitize_filename(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caminho_e_prefixado_pelo_tenant() {
        let brand_id = Uuid::new_v4();
        let path = object_path(brand_id, AssetCategory::Logos, "logo.png");
        assert_eq!(path, format!("{}/logos/logo.png", brand_id));
    }

    #[test]
    fn sanitizacao_bloqueia_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "___etc_passwd");
        assert!(!object_path(Uuid::new_v4(), AssetCategory::Assets, "../x").contains(".."));
        assert_eq!(sanitize_filename(""), "arquivo");
        assert_eq!(sanitize_filename("a/b\\c.pdf"), "a_b_c.pdf");
    }

    #[test]
    fn validacao_sem_arquivo() {
        assert!(matches!(
            validate_upload(None, "image/png", 10),
            Err(AppError::MissingFile)
        ));
        assert!(matches!(
            validate_upload(Some("  "), "image/png", 10),
            Err(AppError::MissingFile)
        ));
    }

    #[test]
    fn validacao_de_tipo_e_tamanho() {
        assert!(matches!(
            validate_upload(Some("a.zip"), "application/zip", 10),
            Err(AppError::InvalidFileType(_))
        ));
        assert!(matches!(
            validate_upload(Some("a.png"), "image/png", MAX_UPLOAD_BYTES + 1),
            Err(AppError::FileTooLarge { .. })
        ));
        assert!(validate_upload(Some("a.png"), "image/png", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn categoria_desconhecida_e_rejeitada() {
        assert_eq!(AssetCategory::parse("secrets"), None);
        assert_eq!(AssetCategory::parse("logos"), Some(AssetCategory::Logos));
    }
}

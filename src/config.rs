// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        BrandRepository, ConversationRepository, GuidelinesRepository, NotificationRepository,
        ProjectRepository, QuotaRepository, UserRepository,
    },
    services::{
        auth::AuthService, brand_service::BrandService, guidelines_service::GuidelinesService,
        mailer, member_service::MemberService, notification_service::NotificationService,
        quota_service::QuotaService, sharing_service::SharingService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub brand_repo: BrandRepository,
    pub conversation_repo: ConversationRepository,
    pub project_repo: ProjectRepository,
    pub notification_repo: NotificationRepository,
    pub auth_service: AuthService,
    pub brand_service: BrandService,
    pub member_service: MemberService,
    pub sharing_service: SharingService,
    pub guidelines_service: GuidelinesService,
    pub quota_service: QuotaService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Configuração load-bearing: sem banco e sem segredo não há servidor.
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // SMTP ausente desliga o recurso com um aviso; não derruba nada.
        let mailer = mailer::mailer_from_env()?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let brand_repo = BrandRepository::new(db_pool.clone());
        let conversation_repo = ConversationRepository::new(db_pool.clone());
        let project_repo = ProjectRepository::new(db_pool.clone());
        let guidelines_repo = GuidelinesRepository::new(db_pool.clone());
        let quota_repo = QuotaRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());

        let notification_service =
            NotificationService::new(notification_repo.clone(), user_repo.clone(), mailer);
        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let brand_service =
            BrandService::new(brand_repo.clone(), quota_repo.clone(), db_pool.clone());
        let member_service = MemberService::new(
            brand_repo.clone(),
            user_repo.clone(),
            notification_service.clone(),
            db_pool.clone(),
        );
        let quota_service = QuotaService::new(quota_repo.clone());
        let sharing_service = SharingService::new(
            conversation_repo.clone(),
            project_repo.clone(),
            user_repo.clone(),
            brand_repo.clone(),
            notification_service.clone(),
            quota_service.clone(),
            db_pool.clone(),
        );
        let guidelines_service =
            GuidelinesService::new(guidelines_repo, brand_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            brand_repo,
            conversation_repo,
            project_repo,
            notification_repo,
            auth_service,
            brand_service,
            member_service,
            sharing_service,
            guidelines_service,
            quota_service,
        })
    }
}

// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é aceitável aqui: se a configuração falhar, a aplicação
    // não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me));

    // Marcas + diretrizes (diretrizes usam brandId no path, conforme o
    // contrato; a associação é checada no serviço)
    let brand_routes = Router::new()
        .route("/"
               ,post(handlers::brands::create_brand)
               .get(handlers::brands::list_my_brands)
        )
        .route("/{brand_id}/guidelines"
               ,get(handlers::guidelines::get_guidelines)
               .put(handlers::guidelines::upsert_guidelines)
        )
        .route("/{brand_id}/guidelines/approve"
               ,post(handlers::guidelines::approve_guidelines)
        );

    // Membros da marca (escopo via cabeçalho x-brand-id)
    let member_routes = Router::new()
        .route("/", get(handlers::members::list_members))
        .route("/role"
               ,patch(handlers::members::update_member_role)
               .delete(handlers::members::remove_member)
        )
        .route("/invite", post(handlers::members::invite_member));

    let conversation_routes = Router::new()
        .route("/"
               ,post(handlers::conversations::create_conversation)
               .get(handlers::conversations::list_conversations)
        )
        .route("/share", post(handlers::conversations::share_conversation));

    let project_routes = Router::new()
        .route("/"
               ,post(handlers::projects::create_project)
               .get(handlers::projects::list_projects)
        )
        .route("/share", post(handlers::projects::share_project))
        .route("/shares/respond", post(handlers::projects::respond_project_share));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route("/read", patch(handlers::notifications::mark_read));

    // Tudo que não é público passa pelo auth_guard.
    let protected = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/brands", brand_routes)
        .nest("/api/brand-members", member_routes)
        .nest("/api/conversations", conversation_routes)
        .nest("/api/projects", project_routes)
        .nest("/api/notifications", notification_routes)
        .route("/api/collaborative-messages"
               ,get(handlers::conversations::get_collaborative_messages)
               .post(handlers::conversations::post_collaborative_message)
        )
        .route("/api/shares/respond", post(handlers::conversations::respond_share))
        .route("/api/shared-conversations/list"
               ,get(handlers::conversations::list_shared_conversations))
        .route("/api/shared-projects/list", get(handlers::projects::list_shared_projects))
        .route("/api/quota", get(handlers::quota::get_quota))
        .route("/api/assets/upload-path", post(handlers::assets::upload_path))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/roles", get(handlers::rbac::list_roles))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Brands ---
        handlers::brands::create_brand,
        handlers::brands::list_my_brands,

        // --- Members ---
        handlers::members::list_members,
        handlers::members::update_member_role,
        handlers::members::remove_member,
        handlers::members::invite_member,
        handlers::rbac::list_roles,

        // --- Guidelines ---
        handlers::guidelines::get_guidelines,
        handlers::guidelines::upsert_guidelines,
        handlers::guidelines::approve_guidelines,

        // --- Conversations ---
        handlers::conversations::create_conversation,
        handlers::conversations::list_conversations,
        handlers::conversations::get_collaborative_messages,
        handlers::conversations::post_collaborative_message,
        handlers::conversations::share_conversation,
        handlers::conversations::respond_share,
        handlers::conversations::list_shared_conversations,

        // --- Projects ---
        handlers::projects::create_project,
        handlers::projects::list_projects,
        handlers::projects::share_project,
        handlers::projects::respond_project_share,
        handlers::projects::list_shared_projects,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_read,

        // --- Quota ---
        handlers::quota::get_quota,

        // --- Assets ---
        handlers::assets::upload_path,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- RBAC ---
            models::rbac::BrandRole,
            models::rbac::Permission,
            models::rbac::RoleInfo,

            // --- Brands ---
            models::brand::Brand,
            models::brand::BrandMembership,
            models::brand::BrandMemberView,
            models::brand::BrandWithRole,
            models::brand::CreateBrandPayload,
            models::brand::UpdateMemberRolePayload,
            models::brand::InviteMemberPayload,
            models::brand::MemberMutationResponse,

            // --- Conversations ---
            models::conversation::SharePermission,
            models::conversation::ShareStatus,
            models::conversation::Conversation,
            models::conversation::ConversationShare,
            models::conversation::Message,
            models::conversation::MessageView,
            models::conversation::CollaborativeMessagesResponse,
            models::conversation::SharedConversationView,
            models::conversation::CreateConversationPayload,
            models::conversation::ShareConversationPayload,
            models::conversation::RespondSharePayload,
            models::conversation::PostMessagePayload,

            // --- Projects ---
            models::project::Project,
            models::project::ProjectShare,
            models::project::SharedProjectView,
            models::project::CreateProjectPayload,
            models::project::ShareProjectPayload,

            // --- Guidelines ---
            models::guidelines::GuidelinesStatus,
            models::guidelines::BrandGuidelines,
            models::guidelines::UpsertGuidelinesPayload,
            models::guidelines::GuidelinesResponse,
            models::guidelines::GuidelinesPendingResponse,

            // --- Quota ---
            models::quota::QuotaKind,
            models::quota::QuotaStatus,

            // --- Notifications ---
            models::notification::Notification,
            models::notification::MarkReadPayload,
            models::notification::MarkReadResponse,

            // --- Payloads de assets ---
            handlers::assets::UploadPathPayload,
            handlers::assets::UploadPathResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro, login e sessão"),
        (name = "Brands", description = "Marcas (tenants)"),
        (name = "Members", description = "Membros e papéis"),
        (name = "Guidelines", description = "Diretrizes de marca"),
        (name = "Conversations", description = "Conversas e colaboração"),
        (name = "Projects", description = "Projetos compartilháveis"),
        (name = "Notifications", description = "Notificações in-app"),
        (name = "Quota", description = "Cotas de uso"),
        (name = "Assets", description = "Upload de materiais")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

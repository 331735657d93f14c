// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// O papel de um membro dentro de uma marca.
// Persistido como TEXT; valores desconhecidos no banco falham o parse
// e viram "sem permissões" (fail closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BrandRole {
    Owner,
    Admin,
    Editor,
    Reviewer,
    User,
}

impl BrandRole {
    pub const ALL: [BrandRole; 5] = [
        BrandRole::Owner,
        BrandRole::Admin,
        BrandRole::Editor,
        BrandRole::Reviewer,
        BrandRole::User,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "owner" => Some(BrandRole::Owner),
            "admin" => Some(BrandRole::Admin),
            "editor" => Some(BrandRole::Editor),
            "reviewer" => Some(BrandRole::Reviewer),
            "user" => Some(BrandRole::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrandRole::Owner => "owner",
            BrandRole::Admin => "admin",
            BrandRole::Editor => "editor",
            BrandRole::Reviewer => "reviewer",
            BrandRole::User => "user",
        }
    }

    // Hierarquia fixa: owner=5, admin=4, editor=3, reviewer=2, user=1.
    pub fn rank(&self) -> u8 {
        match self {
            BrandRole::Owner => 5,
            BrandRole::Admin => 4,
            BrandRole::Editor => 3,
            BrandRole::Reviewer => 2,
            BrandRole::User => 1,
        }
    }
}

// As ações que o modelo de permissões conhece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageBrand,
    InviteMembers,
    RemoveMembers,
    ChangeRoles,
    EditGuidelines,
    ApproveGuidelines,
    ReviewGuidelines,
    UploadAssets,
    UseChat,
    ShareConversations,
}

// Cada lista é enumerada por completo de propósito: a lista do editor NÃO
// deriva da do reviewer. Mudar as permissões de um papel nunca muda,
// implicitamente, as de outro.
const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::ManageBrand,
    Permission::InviteMembers,
    Permission::RemoveMembers,
    Permission::ChangeRoles,
    Permission::EditGuidelines,
    Permission::ApproveGuidelines,
    Permission::ReviewGuidelines,
    Permission::UploadAssets,
    Permission::UseChat,
    Permission::ShareConversations,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::InviteMembers,
    Permission::RemoveMembers,
    Permission::EditGuidelines,
    Permission::ApproveGuidelines,
    Permission::ReviewGuidelines,
    Permission::UploadAssets,
    Permission::UseChat,
    Permission::ShareConversations,
];

const EDITOR_PERMISSIONS: &[Permission] = &[
    Permission::EditGuidelines,
    Permission::ReviewGuidelines,
    Permission::UploadAssets,
    Permission::UseChat,
    Permission::ShareConversations,
];

const REVIEWER_PERMISSIONS: &[Permission] = &[
    Permission::ReviewGuidelines,
    Permission::UseChat,
];

const USER_PERMISSIONS: &[Permission] = &[Permission::UseChat];

pub fn permissions_for(role: BrandRole) -> &'static [Permission] {
    match role {
        BrandRole::Owner => OWNER_PERMISSIONS,
        BrandRole::Admin => ADMIN_PERMISSIONS,
        BrandRole::Editor => EDITOR_PERMISSIONS,
        BrandRole::Reviewer => REVIEWER_PERMISSIONS,
        BrandRole::User => USER_PERMISSIONS,
    }
}

/// Verifica se o papel pode executar a ação. Função pura sobre tabelas
/// estáticas; não existe caminho de mutação em tempo de execução.
pub fn has_permission(role: BrandRole, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

pub fn is_role_at_least(role: BrandRole, min_role: BrandRole) -> bool {
    role.rank() >= min_role.rank()
}

pub fn is_role_higher_than(role: BrandRole, other: BrandRole) -> bool {
    role.rank() > other.rank()
}

/// Um gestor só administra quem está ESTRITAMENTE abaixo dele na
/// hierarquia. Papéis iguais não se administram entre si.
pub fn can_manage_user(manager_role: BrandRole, target_role: BrandRole) -> bool {
    is_role_higher_than(manager_role, target_role)
}

// Linha da tabela de papéis exposta para o frontend montar telas de
// gestão (GET /api/roles).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    #[schema(example = "editor")]
    pub role: BrandRole,

    #[schema(example = 3)]
    pub rank: u8,

    pub permissions: Vec<Permission>,
}

pub fn role_table() -> Vec<RoleInfo> {
    BrandRole::ALL
        .iter()
        .map(|role| RoleInfo {
            role: *role,
            rank: role.rank(),
            permissions: permissions_for(*role).to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_permission_e_estavel() {
        for role in BrandRole::ALL {
            for perm in permissions_for(role) {
                assert_eq!(has_permission(role, *perm), has_permission(role, *perm));
                assert!(has_permission(role, *perm));
            }
        }
    }

    #[test]
    fn comparacao_de_papeis_segue_a_tabela_de_ranks() {
        for a in BrandRole::ALL {
            for b in BrandRole::ALL {
                assert_eq!(is_role_higher_than(a, b), a.rank() > b.rank());
                assert_eq!(is_role_at_least(a, b), a.rank() >= b.rank());
            }
        }
    }

    #[test]
    fn papeis_iguais_nao_se_administram() {
        for role in BrandRole::ALL {
            assert!(!can_manage_user(role, role));
        }
        assert!(can_manage_user(BrandRole::Owner, BrandRole::Admin));
        assert!(can_manage_user(BrandRole::Admin, BrandRole::Editor));
        assert!(!can_manage_user(BrandRole::Admin, BrandRole::Owner));
        assert!(!can_manage_user(BrandRole::User, BrandRole::Reviewer));
    }

    #[test]
    fn papel_desconhecido_falha_fechado() {
        assert_eq!(BrandRole::parse("superadmin"), None);
        assert_eq!(BrandRole::parse(""), None);
        assert_eq!(BrandRole::parse("Owner"), None); // case-sensitive
    }

    #[test]
    fn parse_e_as_str_sao_inversos() {
        for role in BrandRole::ALL {
            assert_eq!(BrandRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn listas_refletem_o_contrato_de_cada_papel() {
        // owner tem tudo
        for perm in ADMIN_PERMISSIONS {
            assert!(has_permission(BrandRole::Owner, *perm));
        }
        // só o owner troca papéis pela tabela geral
        assert!(has_permission(BrandRole::Owner, Permission::ChangeRoles));
        assert!(!has_permission(BrandRole::Admin, Permission::ChangeRoles));
        // admin remove membros, editor não
        assert!(has_permission(BrandRole::Admin, Permission::RemoveMembers));
        assert!(!has_permission(BrandRole::Editor, Permission::RemoveMembers));
        // reviewer não edita diretrizes, mas revisa
        assert!(!has_permission(BrandRole::Reviewer, Permission::EditGuidelines));
        assert!(has_permission(BrandRole::Reviewer, Permission::ReviewGuidelines));
        // user só conversa
        assert_eq!(permissions_for(BrandRole::User), &[Permission::UseChat]);
    }
}

//! User administration service

use jurybox_rules::{Role, RoleSet};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::{Page, PageQuery},
};

pub struct AdminService;

impl AdminService {
    /// List users, optionally only those holding `role`
    pub async fn list_users(
        pool: &PgPool,
        role: Option<Role>,
        page: PageQuery,
    ) -> AppResult<Page<User>> {
        let (users, total) = futures::try_join!(
            UserRepository::list(pool, role, page.limit(), page.offset()),
            UserRepository::count(pool, role),
        )?;

        Ok(Page::new(users, total, page))
    }

    /// Replace a user's role set.
    ///
    /// Staff cannot remove their own staff role. Takes effect at the user's
    /// next login or token refresh.
    pub async fn set_roles(
        pool: &PgPool,
        admin_id: &Uuid,
        user_id: &Uuid,
        roles: RoleSet,
    ) -> AppResult<User> {
        if admin_id == user_id && !roles.contains(Role::Staff) {
            return Err(AppError::Validation(
                "You cannot remove your own staff role".to_string(),
            ));
        }

        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let user = UserRepository::set_roles(pool, user_id, roles).await?;

        tracing::info!(
            admin_id = %admin_id,
            user_id = %user_id,
            roles = ?user.roles,
            "User roles replaced"
        );
        Ok(user)
    }
}

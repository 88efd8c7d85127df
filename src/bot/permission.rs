//! Staff role checks.
//!
//! Staff is whoever holds the role named in the configuration. The role is looked up
//! by name on every check so renaming or recreating it takes effect immediately.

use serenity::{
    all::{GuildId, Member, Role, RoleId},
    http::Http,
};
use std::collections::HashMap;

use crate::error::AppError;

/// Finds a role by its exact name.
pub fn find_role_by_name(roles: &HashMap<RoleId, Role>, name: &str) -> Option<RoleId> {
    roles
        .values()
        .find(|role| role.name == name)
        .map(|role| role.id)
}

/// Whether a member holds the given role.
pub fn member_has_role(member: &Member, role_id: RoleId) -> bool {
    member.roles.contains(&role_id)
}

/// Looks up the staff role of a guild.
///
/// # Returns
/// - `Ok(Some(RoleId))` - The staff role exists
/// - `Ok(None)` - No role with that name
/// - `Err(AppError::DiscordErr)` - Roles could not be fetched
pub async fn staff_role(
    http: &Http,
    guild_id: GuildId,
    staff_role_name: &str,
) -> Result<Option<RoleId>, AppError> {
    let roles = guild_id.roles(http).await?;

    Ok(find_role_by_name(&roles, staff_role_name))
}

/// Whether a member is staff in the guild.
///
/// Always false when the guild has no staff role.
pub async fn is_staff(
    http: &Http,
    guild_id: GuildId,
    member: &Member,
    staff_role_name: &str,
) -> Result<bool, AppError> {
    Ok(staff_role(http, guild_id, staff_role_name)
        .await?
        .is_some_and(|role_id| member_has_role(member, role_id)))
}

/// Rejects members without the staff role.
///
/// # Returns
/// - `Ok(())` - Member is staff
/// - `Err(AppError::MissingStaffRole)` - Member is not staff, or the guild has no staff role
pub async fn require_staff(
    http: &Http,
    guild_id: GuildId,
    member: &Member,
    staff_role_name: &str,
) -> Result<(), AppError> {
    if is_staff(http, guild_id, member, staff_role_name).await? {
        Ok(())
    } else {
        Err(AppError::MissingStaffRole(member.user.id.get()))
    }
}

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use cinema_shared::constants::{ERROR_AUTHENTICATION_REQUIRED, ERROR_INSUFFICIENT_PERMISSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Movie,
    Theater,
    Showing,
    SnackItem,
    Booking,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Anyone,
    Authenticated,
    /// The cinema's own staff flag, checked for snack inventory writes.
    StaffMember,
    /// The native admin pair (`is_staff` or `is_superuser`), checked
    /// everywhere else.
    Staff,
}

/// Access-policy table keyed by (resource, action).
///
/// Snack inventory writes key on `is_staff_member` while every other staff
/// gate keys on `is_staff`/`is_superuser`. The two flags are deliberately
/// distinct booleans on the user record.
pub fn required_access(resource: Resource, action: Action) -> AccessLevel {
    use Action::*;

    match (resource, action) {
        (Resource::Movie, List | Retrieve) => AccessLevel::Anyone,
        (Resource::Movie, _) => AccessLevel::Staff,

        (Resource::Theater, List | Retrieve) => AccessLevel::Authenticated,
        (Resource::Theater, _) => AccessLevel::Staff,

        (Resource::Showing, List | Retrieve) => AccessLevel::Authenticated,
        (Resource::Showing, _) => AccessLevel::Staff,

        (Resource::SnackItem, List | Retrieve) => AccessLevel::Authenticated,
        (Resource::SnackItem, _) => AccessLevel::StaffMember,

        (Resource::Booking, _) => AccessLevel::Authenticated,

        (Resource::User, _) => AccessLevel::Staff,
    }
}

/// Evaluate the policy table for a caller. `None` means anonymous.
pub fn authorize(
    resource: Resource,
    action: Action,
    caller: Option<&AuthenticatedUser>,
) -> Result<(), AppError> {
    let required = required_access(resource, action);

    if required == AccessLevel::Anyone {
        return Ok(());
    }

    let user = caller
        .ok_or_else(|| AppError::Authentication(ERROR_AUTHENTICATION_REQUIRED.to_string()))?;

    let allowed = match required {
        AccessLevel::Anyone | AccessLevel::Authenticated => true,
        AccessLevel::StaffMember => user.is_staff_member,
        AccessLevel::Staff => user.is_staff || user.is_superuser,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Authorization(
            ERROR_INSUFFICIENT_PERMISSIONS.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn customer() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            username: "customer".to_string(),
            is_staff_member: false,
            is_staff: false,
            is_superuser: false,
        }
    }

    fn snack_staff() -> AuthenticatedUser {
        AuthenticatedUser {
            is_staff_member: true,
            ..customer()
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            is_staff: true,
            ..customer()
        }
    }

    #[test]
    fn anonymous_can_list_movies_but_not_theaters() {
        assert!(authorize(Resource::Movie, Action::List, None).is_ok());
        assert!(matches!(
            authorize(Resource::Theater, Action::List, None),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn authenticated_non_staff_lists_theaters_but_cannot_create_them() {
        let user = customer();
        assert!(authorize(Resource::Theater, Action::List, Some(&user)).is_ok());
        assert!(matches!(
            authorize(Resource::Theater, Action::Create, Some(&user)),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn snack_writes_require_the_staff_member_flag_not_the_native_one() {
        let native_admin = admin();
        let inventory_staff = snack_staff();

        assert!(matches!(
            authorize(Resource::SnackItem, Action::Create, Some(&native_admin)),
            Err(AppError::Authorization(_))
        ));
        assert!(authorize(Resource::SnackItem, Action::Create, Some(&inventory_staff)).is_ok());

        // The same split cuts the other way for movies.
        assert!(authorize(Resource::Movie, Action::Create, Some(&native_admin)).is_ok());
        assert!(matches!(
            authorize(Resource::Movie, Action::Create, Some(&inventory_staff)),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn superuser_passes_native_staff_gates() {
        let root = AuthenticatedUser {
            is_superuser: true,
            ..customer()
        };
        assert!(authorize(Resource::User, Action::List, Some(&root)).is_ok());
        assert!(authorize(Resource::Showing, Action::Delete, Some(&root)).is_ok());
    }

    #[test]
    fn bookings_need_authentication_only() {
        assert!(authorize(Resource::Booking, Action::Create, Some(&customer())).is_ok());
        assert!(matches!(
            authorize(Resource::Booking, Action::Create, None),
            Err(AppError::Authentication(_))
        ));
    }
}

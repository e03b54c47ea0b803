//! The fixed permission table for trip-scoped operations.

use crate::database::membership::TripRole;

/// Outcome of resolving a caller against a trip's membership ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted(TripRole),
    NotAMember,
}

impl From<Option<TripRole>> for Access {
    fn from(role: Option<TripRole>) -> Self {
        role.map_or(Self::NotAMember, Self::Granted)
    }
}

impl Access {
    #[must_use]
    pub const fn role(self) -> Option<TripRole> {
        match self {
            Self::Granted(role) => Some(role),
            Self::NotAMember => None,
        }
    }
}

/// Every operation that touches a trip's data. Author-restricted actions carry the id of the
/// user who created the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripAction {
    ViewTrip,
    ViewChat,
    ViewGallery,
    Export,
    PostMessage,
    CreateExpense,
    DeleteExpense { author_id: i32 },
    UploadMedia,
    DeleteMedia { uploader_id: i32 },
    CreateItineraryItem,
    DeleteItineraryItem,
    ChangeMemberRole,
    LeaveTrip,
}

impl TripAction {
    #[must_use]
    pub const fn minimum_role(self) -> TripRole {
        match self {
            Self::CreateItineraryItem | Self::DeleteItineraryItem | Self::ChangeMemberRole => {
                TripRole::Organizer
            }
            Self::ViewTrip
            | Self::ViewChat
            | Self::ViewGallery
            | Self::Export
            | Self::PostMessage
            | Self::CreateExpense
            | Self::DeleteExpense { .. }
            | Self::UploadMedia
            | Self::DeleteMedia { .. }
            | Self::LeaveTrip => TripRole::Member,
        }
    }

    /// The user that must be the caller, for actions limited to a resource's author.
    #[must_use]
    pub const fn required_author(self) -> Option<i32> {
        match self {
            Self::DeleteExpense { author_id } => Some(author_id),
            Self::DeleteMedia { uploader_id } => Some(uploader_id),
            _ => None,
        }
    }
}

/// Whether a caller with `access` to a trip may perform `action` on it.
#[must_use]
pub fn is_permitted(access: Access, caller_id: i32, action: TripAction) -> bool {
    let Access::Granted(role) = access else {
        return false;
    };
    role >= action.minimum_role()
        && action
            .required_author()
            .is_none_or(|author_id| author_id == caller_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALLER: i32 = 1;
    const SOMEONE_ELSE: i32 = 2;

    const MEMBER_ACTIONS: [TripAction; 9] = [
        TripAction::ViewTrip,
        TripAction::ViewChat,
        TripAction::ViewGallery,
        TripAction::Export,
        TripAction::PostMessage,
        TripAction::CreateExpense,
        TripAction::UploadMedia,
        TripAction::LeaveTrip,
        TripAction::DeleteExpense { author_id: CALLER },
    ];

    const ORGANIZER_ACTIONS: [TripAction; 3] = [
        TripAction::CreateItineraryItem,
        TripAction::DeleteItineraryItem,
        TripAction::ChangeMemberRole,
    ];

    #[test]
    fn access_reflects_the_stored_role() {
        assert_eq!(
            Access::from(Some(TripRole::Organizer)),
            Access::Granted(TripRole::Organizer)
        );
        assert_eq!(
            Access::from(Some(TripRole::Member)),
            Access::Granted(TripRole::Member)
        );
        assert_eq!(Access::from(None), Access::NotAMember);
        assert_eq!(Access::NotAMember.role(), None);
    }

    #[test]
    fn non_members_may_do_nothing() {
        for action in MEMBER_ACTIONS.iter().chain(&ORGANIZER_ACTIONS) {
            assert!(!is_permitted(Access::NotAMember, CALLER, *action), "{action:?}");
        }
    }

    #[test]
    fn members_may_read_and_contribute() {
        let member = Access::Granted(TripRole::Member);
        for action in MEMBER_ACTIONS {
            assert!(is_permitted(member, CALLER, action), "{action:?}");
        }
        for action in ORGANIZER_ACTIONS {
            assert!(!is_permitted(member, CALLER, action), "{action:?}");
        }
    }

    #[test]
    fn organizers_may_do_everything_members_can() {
        let organizer = Access::Granted(TripRole::Organizer);
        for action in MEMBER_ACTIONS.iter().chain(&ORGANIZER_ACTIONS) {
            assert!(is_permitted(organizer, CALLER, *action), "{action:?}");
        }
    }

    #[test]
    fn only_the_author_may_delete_their_expense() {
        for role in [TripRole::Member, TripRole::Organizer] {
            let access = Access::Granted(role);
            let others = TripAction::DeleteExpense {
                author_id: SOMEONE_ELSE,
            };
            assert!(!is_permitted(access, CALLER, others));
            assert!(is_permitted(access, SOMEONE_ELSE, others));
        }
    }

    #[test]
    fn only_the_uploader_may_delete_their_media() {
        for role in [TripRole::Member, TripRole::Organizer] {
            let access = Access::Granted(role);
            let own = TripAction::DeleteMedia {
                uploader_id: CALLER,
            };
            let others = TripAction::DeleteMedia {
                uploader_id: SOMEONE_ELSE,
            };
            assert!(is_permitted(access, CALLER, own));
            assert!(!is_permitted(access, CALLER, others));
        }
        let own = TripAction::DeleteMedia {
            uploader_id: CALLER,
        };
        assert!(!is_permitted(Access::NotAMember, CALLER, own));
    }
}

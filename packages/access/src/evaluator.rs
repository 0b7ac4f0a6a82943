// ABOUTME: Permission evaluator: the rule table over (actor, action, resolved scope)
// ABOUTME: Contributorship gates visibility and creation; authorship additionally gates mutation

use tracing::{debug, warn};

use tracker_core::Actor;

use crate::action::Action;
use crate::error::{AccessError, AccessResult};
use crate::lookup::ScopeLookup;
use crate::scope::{resolve, ResolvedScope, ResourcePath, Target};

pub const CONTRIBUTOR_REQUIRED: &str = "You must be a contributor of this project to access it.";
pub const AUTHOR_REQUIRED: &str = "You must be the author of this resource to modify or delete it.";
const NOT_PERMITTED: &str = "This action is not permitted on this resource.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Unauthenticated,
    Deny(&'static str),
}

/// Decide whether `actor` may perform `action` on an already resolved scope.
///
/// Rules are evaluated in order and the first match wins.
pub fn authorize(actor: Actor, action: Action, scope: &ResolvedScope) -> Decision {
    let Some(user_id) = actor.user_id() else {
        return Decision::Unauthenticated;
    };

    match (&scope.target, action) {
        // Listing is filtered to the actor's projects by the caller
        (Target::Projects, Action::Create | Action::Read) => Decision::Allow,
        (Target::Projects, Action::Mutate) => Decision::Deny(NOT_PERMITTED),

        (_, Action::Read) => require_contributor(scope, user_id),

        (Target::Issues(_) | Target::Comments(_), Action::Create) => {
            require_contributor(scope, user_id)
        }

        (Target::Contributors(s), Action::Create) => {
            require_author(scope, user_id, s.project.author_id)
        }

        (
            Target::Project(_) | Target::Contributor(_) | Target::Issue(_) | Target::Comment(_),
            Action::Mutate,
        ) => match scope.target.author_id() {
            Some(author_id) => require_author(scope, user_id, author_id),
            None => Decision::Deny(NOT_PERMITTED),
        },

        _ => Decision::Deny(NOT_PERMITTED),
    }
}

fn require_contributor(scope: &ResolvedScope, user_id: i64) -> Decision {
    if scope.is_contributor(user_id) {
        Decision::Allow
    } else {
        Decision::Deny(CONTRIBUTOR_REQUIRED)
    }
}

fn require_author(scope: &ResolvedScope, user_id: i64, author_id: i64) -> Decision {
    match require_contributor(scope, user_id) {
        Decision::Allow if user_id == author_id => Decision::Allow,
        Decision::Allow => Decision::Deny(AUTHOR_REQUIRED),
        denied => denied,
    }
}

/// Resolve `path` and evaluate the rule table for it.
///
/// Anonymous actors are rejected before any lookup; missing entities surface
/// as `NotFound` before membership or authorship is considered.
pub async fn check<L>(
    lookup: &mut L,
    actor: Actor,
    action: Action,
    path: ResourcePath,
) -> AccessResult<ResolvedScope>
where
    L: ScopeLookup + ?Sized,
{
    if !actor.is_authenticated() {
        warn!("Rejected anonymous {} on {:?}", action, path);
        return Err(AccessError::Unauthenticated);
    }

    let scope = resolve(lookup, &path).await?;

    match authorize(actor, action, &scope) {
        Decision::Allow => {
            debug!("Allowed {:?} {} on {:?}", actor, action, path);
            Ok(scope)
        }
        Decision::Unauthenticated => Err(AccessError::Unauthenticated),
        Decision::Deny(reason) => {
            warn!("Denied {:?} {} on {:?}: {}", actor, action, path, reason);
            Err(AccessError::PermissionDenied(reason.to_string()))
        }
    }
}

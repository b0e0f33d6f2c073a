// ── Per-operation failure policy ──
//
// Reads and writes fail differently. This table is the single
// place that says which store operations swallow, propagate, or substitute
// a local result when the backend call fails.

use strum::{Display, EnumIter, IntoStaticStr};
use tracing::{debug, warn};

use crate::error::CoreError;

/// A store action that talks to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    LoadBoxes,
    AddBox,
    UpdateBox,
    DeleteBox,
    LoadLocationProfiles,
    LoadActiveLocationProfile,
    SaveLocationProfile,
    ActivateLocationProfile,
    DeleteLocationProfile,
    LoadActivityLogs,
    AddActivityLog,
    ClearActivityLogs,
    Login,
    GetUser,
}

/// What a store does with a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FailurePolicy {
    /// Return the error to the caller; local state is untouched.
    Propagate,
    /// Log the error and keep the previous local state.
    KeepPrevious,
    /// Log the error and apply a locally synthesized result.
    LocalFallback,
}

impl Operation {
    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::LoadBoxes
            | Self::LoadLocationProfiles
            | Self::LoadActiveLocationProfile
            | Self::LoadActivityLogs
            | Self::ClearActivityLogs => FailurePolicy::KeepPrevious,
            Self::AddBox
            | Self::UpdateBox
            | Self::DeleteBox
            | Self::SaveLocationProfile
            | Self::ActivateLocationProfile
            | Self::DeleteLocationProfile
            | Self::Login
            | Self::GetUser => FailurePolicy::Propagate,
            Self::AddActivityLog => FailurePolicy::LocalFallback,
        }
    }
}

/// Apply a `KeepPrevious` operation's result: `None` on failure, logged.
pub(crate) fn absorb<T>(op: Operation, result: Result<T, ccro_api::Error>) -> Option<T> {
    debug_assert_eq!(op.failure_policy(), FailurePolicy::KeepPrevious);
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(operation = %op, error = %e, "request failed, keeping previous state");
            None
        }
    }
}

/// Apply a `Propagate` operation's result.
pub(crate) fn propagate<T>(
    op: Operation,
    result: Result<T, ccro_api::Error>,
) -> Result<T, CoreError> {
    debug_assert_eq!(op.failure_policy(), FailurePolicy::Propagate);
    result.map_err(|e| {
        debug!(operation = %op, error = %e, "request failed, returning error to caller");
        CoreError::from(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn reads_keep_previous_state() {
        for op in [
            Operation::LoadBoxes,
            Operation::LoadLocationProfiles,
            Operation::LoadActiveLocationProfile,
            Operation::LoadActivityLogs,
        ] {
            assert_eq!(op.failure_policy(), FailurePolicy::KeepPrevious, "{op}");
        }
    }

    #[test]
    fn box_and_profile_mutations_propagate() {
        for op in [
            Operation::AddBox,
            Operation::UpdateBox,
            Operation::DeleteBox,
            Operation::SaveLocationProfile,
            Operation::ActivateLocationProfile,
            Operation::DeleteLocationProfile,
        ] {
            assert_eq!(op.failure_policy(), FailurePolicy::Propagate, "{op}");
        }
    }

    #[test]
    fn clearing_the_log_keeps_previous_state() {
        assert_eq!(
            Operation::ClearActivityLogs.failure_policy(),
            FailurePolicy::KeepPrevious
        );
    }

    #[test]
    fn only_activity_recording_falls_back_locally() {
        let fallbacks: Vec<Operation> = Operation::iter()
            .filter(|op| op.failure_policy() == FailurePolicy::LocalFallback)
            .collect();
        assert_eq!(fallbacks, vec![Operation::AddActivityLog]);
    }

    #[test]
    fn absorb_swallows_errors() {
        let failed: Result<u8, ccro_api::Error> = Err(ccro_api::Error::Http {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(absorb(Operation::LoadBoxes, failed), None);
        assert_eq!(absorb(Operation::LoadBoxes, Ok(3)), Some(3));
    }

    #[test]
    fn propagate_maps_errors() {
        let failed: Result<u8, ccro_api::Error> = Err(ccro_api::Error::Http {
            status: 422,
            message: "code is required".into(),
        });
        let err = propagate(Operation::AddBox, failed).unwrap_err();
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn operation_names_are_snake_case() {
        assert_eq!(
            Operation::LoadActiveLocationProfile.to_string(),
            "load_active_location_profile"
        );
        let name: &'static str = Operation::AddActivityLog.into();
        assert_eq!(name, "add_activity_log");
    }
}

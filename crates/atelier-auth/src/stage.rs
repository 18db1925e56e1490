//! Stage access scoping.
//!
//! A viewer may see and act on a stage when any of these hold:
//!
//! | Rule | Reason |
//! |------|--------|
//! | admin override applies | [`StageAccessReason::Admin`] |
//! | role is Client, Principal Architect or Project Manager | [`StageAccessReason::PrivilegedRole`] |
//! | viewer's name is in the stage's participant list | [`StageAccessReason::Participant`] |
//! | viewer is assignee of a task in the stage, by role or by name | [`StageAccessReason::Assignee`] |
//!
//! The rules are an unordered OR; the reason reported is simply the first
//! rule that matched in the order above.

use crate::viewer::names_match;
use crate::{AccessDenied, SimulationPolicy, Viewer};
use atelier_types::{Role, Stage};
use serde::Serialize;

/// Roles that see every stage of every project.
pub const PRIVILEGED_STAGE_ROLES: [Role; 3] =
    [Role::Client, Role::PrincipalArchitect, Role::ProjectManager];

/// Why a viewer can see a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageAccessReason {
    Admin,
    PrivilegedRole,
    Participant,
    Assignee,
}

impl std::fmt::Display for StageAccessReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::PrivilegedRole => "privileged role",
            Self::Participant => "participant",
            Self::Assignee => "task assignee",
        })
    }
}

/// Stage visibility rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageScope {
    simulation: SimulationPolicy,
}

impl StageScope {
    #[must_use]
    pub fn new(simulation: SimulationPolicy) -> Self {
        Self { simulation }
    }

    /// Returns the first matching reason, or `None` if the viewer is out of scope.
    #[must_use]
    pub fn check(&self, viewer: &Viewer, stage: &Stage) -> Option<StageAccessReason> {
        if viewer.admin_effective(self.simulation) {
            return Some(StageAccessReason::Admin);
        }

        let role = viewer.role();
        if role.is_some_and(|r| PRIVILEGED_STAGE_ROLES.contains(&r)) {
            return Some(StageAccessReason::PrivilegedRole);
        }

        if stage.participants.iter().any(|p| viewer.is_named(p)) {
            return Some(StageAccessReason::Participant);
        }

        let assigned = stage.tasks.iter().any(|task| {
            Some(task.assignee.role) == role
                || task
                    .assignee
                    .person
                    .as_deref()
                    .is_some_and(|person| viewer.is_named(person))
        });
        if assigned {
            return Some(StageAccessReason::Assignee);
        }

        None
    }

    #[must_use]
    pub fn can_access(&self, viewer: &Viewer, stage: &Stage) -> bool {
        self.check(viewer, stage).is_some()
    }

    /// Like [`can_access`](Self::can_access) but as a gate for actions.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::StageDenied`] if the viewer is out of scope.
    pub fn require(&self, viewer: &Viewer, stage: &Stage) -> Result<StageAccessReason, AccessDenied> {
        self.check(viewer, stage).ok_or_else(|| {
            tracing::warn!(viewer = %viewer, stage = %stage.name, "stage access denied");
            AccessDenied::StageDenied {
                stage: stage.name.clone(),
                viewer: viewer.to_string(),
            }
        })
    }

    /// Stages the viewer can see, in their original order, with the reason.
    pub fn visible_stages<'a>(
        &'a self,
        viewer: &'a Viewer,
        stages: &'a [Stage],
    ) -> impl Iterator<Item = (&'a Stage, StageAccessReason)> + 'a {
        stages
            .iter()
            .filter_map(move |stage| self.check(viewer, stage).map(|reason| (stage, reason)))
    }
}

/// Participant names are compared the same way as viewer names.
#[must_use]
pub fn is_participant(stage: &Stage, person: &str) -> bool {
    stage.participants.iter().any(|p| names_match(p, person))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_types::{Assignment, RoleKey, StagePhase, Task};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date")
    }

    fn construction_stage() -> Stage {
        let mut stage = Stage::new(StagePhase::Construction);
        stage.tasks.push(Task::new(
            "Pour foundations",
            Assignment::person(Role::Contractor, "Sam Ortiz"),
            due(),
        ));
        stage.tasks.push(Task::new(
            "Steel review",
            Assignment::role(Role::StructuralEngineer),
            due(),
        ));
        stage
    }

    #[test]
    fn privileged_roles_see_every_stage() {
        let scope = StageScope::default();
        let empty = Stage::new(StagePhase::Concept);
        for role in PRIVILEGED_STAGE_ROLES {
            assert_eq!(
                scope.check(&Viewer::new(role), &empty),
                Some(StageAccessReason::PrivilegedRole)
            );
        }
    }

    #[test]
    fn outsider_is_denied() {
        let scope = StageScope::default();
        let stage = construction_stage();
        let viewer = Viewer::new(Role::InteriorDesigner).with_name("Mia Chen");
        assert_eq!(scope.check(&viewer, &stage), None);
        assert!(scope.require(&viewer, &stage).is_err());
    }

    #[test]
    fn participant_grants_access() {
        let scope = StageScope::default();
        let mut stage = construction_stage();
        let viewer = Viewer::new(Role::InteriorDesigner).with_name("Mia Chen");
        assert!(!scope.can_access(&viewer, &stage));

        stage.participants.push("mia chen".to_string());
        assert_eq!(
            scope.check(&viewer, &stage),
            Some(StageAccessReason::Participant)
        );
    }

    #[test]
    fn assignee_by_role_or_name() {
        let scope = StageScope::default();
        let stage = construction_stage();

        let engineer = Viewer::new(Role::StructuralEngineer);
        assert_eq!(
            scope.check(&engineer, &stage),
            Some(StageAccessReason::Assignee)
        );

        // Named assignee, even when acting under a different role
        let sam = Viewer::new(Role::JuniorArchitect).with_name("Sam Ortiz");
        assert_eq!(scope.check(&sam, &stage), Some(StageAccessReason::Assignee));
    }

    #[test]
    fn unknown_role_needs_participation() {
        let scope = StageScope::default();
        let mut stage = construction_stage();
        let viewer = Viewer::new(RoleKey::parse("Surveyor")).with_name("Ola");
        assert!(!scope.can_access(&viewer, &stage));
        stage.participants.push("Ola".to_string());
        assert!(scope.can_access(&viewer, &stage));
    }

    #[test]
    fn admin_override_follows_simulation_policy() {
        let stage = construction_stage();
        let previewing = Viewer::admin(Role::InteriorDesigner).with_simulation(true);

        assert_eq!(
            StageScope::new(SimulationPolicy::KeepAdminOverride).check(&previewing, &stage),
            Some(StageAccessReason::Admin)
        );
        assert_eq!(
            StageScope::new(SimulationPolicy::SuppressAdminOverride).check(&previewing, &stage),
            None
        );
    }

    #[test]
    fn visible_preserves_order() {
        let scope = StageScope::default();
        let mut concept = Stage::new(StagePhase::Concept);
        concept.participants.push("Ola".to_string());
        let hidden = Stage::new(StagePhase::SchematicDesign);
        let mut handover = Stage::new(StagePhase::Handover);
        handover.participants.push("Ola".to_string());
        let stages = vec![concept, hidden, handover];

        let viewer = Viewer::new(Role::JuniorArchitect).with_name("Ola");
        let phases: Vec<_> = scope
            .visible_stages(&viewer, &stages)
            .map(|(s, _)| s.phase)
            .collect();
        assert_eq!(phases, vec![StagePhase::Concept, StagePhase::Handover]);
    }

    #[test]
    fn is_participant_helper() {
        let mut stage = Stage::new(StagePhase::Concept);
        stage.participants.push(" Ola ".to_string());
        assert!(is_participant(&stage, "ola"));
        assert!(!is_participant(&stage, "Olaf"));
    }

    fn unprivileged_role() -> impl Strategy<Value = Role> {
        prop::sample::select(
            Role::ALL
                .into_iter()
                .filter(|r| !PRIVILEGED_STAGE_ROLES.contains(r))
                .collect::<Vec<_>>(),
        )
    }

    proptest! {
        #[test]
        fn adding_participant_is_sufficient(
            role in unprivileged_role(),
            name in "[A-Z][a-z]{2,8}",
        ) {
            let scope = StageScope::default();
            // No tasks, no participants: only the participant rule can grant
            let mut stage = Stage::new(StagePhase::DesignDevelopment);
            let viewer = Viewer::new(role).with_name(name.clone());
            prop_assert!(!scope.can_access(&viewer, &stage));

            stage.participants.push(name);
            prop_assert!(scope.can_access(&viewer, &stage));
        }
    }
}

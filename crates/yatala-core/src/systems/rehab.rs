//! Rehabilitation system - programs that count toward parole

use log::info;

use crate::catalog::{Catalog, ProgramKind};
use crate::components::Player;
use crate::error::ActionError;

pub const PROGRAM_EDUCATION_GAIN: i32 = 5;
pub const PROGRAM_STRESS_RELIEF: i32 = 10;
pub const PROGRAM_HOPE_GAIN: i32 = 15;
pub const PROGRAM_FATIGUE_RELIEF: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollOutcome {
    Completed { name: String, minutes: u32 },
    /// Already done; nothing changed.
    AlreadyCompleted { name: String },
}

/// Enrol in and complete a program.
///
/// Completing a program again is a no-op reported as
/// [`EnrollOutcome::AlreadyCompleted`], checked before anything else.
pub fn enroll(
    player: &mut Player,
    catalog: &Catalog,
    program_id: &str,
) -> Result<EnrollOutcome, ActionError> {
    let program = catalog
        .programs
        .get(program_id)
        .ok_or_else(|| ActionError::not_found("program", program_id))?;
    if player.completed_programs.contains(program_id) {
        return Ok(EnrollOutcome::AlreadyCompleted {
            name: program.name.clone(),
        });
    }
    if let Some(missing) = program
        .prerequisites
        .iter()
        .find(|p| !player.completed_programs.contains(*p))
    {
        let name = catalog
            .programs
            .get(missing)
            .map_or_else(|| missing.clone(), |p| p.name.clone());
        return Err(ActionError::MissingPrerequisite(name));
    }
    if player.education_level() < program.education_required {
        return Err(ActionError::EducationTooLow {
            required: program.education_required,
            current: player.education_level(),
        });
    }
    player.spend_clean(program.cost)?;

    for (&skill, &gain) in &program.skill_gains {
        player.skills.adjust(skill, gain);
    }
    for (&attr, &gain) in &program.attribute_gains {
        player.attributes.adjust(attr, gain);
    }
    player.adjust_education(PROGRAM_EDUCATION_GAIN);
    player.adjust_parole(program.parole_benefit);
    player.wellness.update(
        -PROGRAM_STRESS_RELIEF,
        PROGRAM_HOPE_GAIN,
        -PROGRAM_FATIGUE_RELIEF,
    );
    match program.kind {
        ProgramKind::Therapy | ProgramKind::SubstanceAbuse => {
            player.stats.therapy_sessions += 1;
        }
        ProgramKind::Vocational => {
            player.vocational_skills.push(program.name.clone());
            player.stats.vocational_certificates += 1;
        }
        ProgramKind::Education => {}
    }
    player.completed_programs.insert(program.id.clone());
    info!(
        "{} completed {}, parole progress {}",
        player.name,
        program.name,
        player.parole_progress()
    );

    Ok(EnrollOutcome::Completed {
        name: program.name.clone(),
        minutes: program.duration_hours.saturating_mul(60),
    })
}

//! Time system - moving the clock and everything that decays with it

use log::debug;
use yatala_logic::clock::GameTime;
use yatala_logic::needs::{decay, NeedRates};

use crate::components::Player;
use crate::error::ActionError;

pub const MAX_WAIT_MINUTES: i64 = 7 * 24 * 60;
pub const MAX_REST_HOURS: i64 = 24;
pub const REST_STRESS_RELIEF_PER_HOUR: i32 = 2;
pub const REST_FATIGUE_RELIEF_PER_HOUR: i32 = 5;

/// Advance the clock and apply one decay step per whole hour boundary
/// crossed. Each midnight crossed is a day off the sentence. Returns the
/// number of hours decayed.
pub fn advance_time(
    clock: &mut GameTime,
    player: &mut Player,
    rates: &NeedRates,
    minutes: u32,
) -> u64 {
    let first_hour = clock.total_hours();
    let first_day = clock.day();
    clock.advance(minutes);
    let hours = clock.total_hours() - first_hour;
    decay(
        &mut player.vitals,
        &mut player.wellness,
        rates,
        first_hour,
        hours,
    );
    player.stats.days_survived = clock.day().saturating_sub(1);
    player.sentence.serve(clock.day().saturating_sub(first_day));
    if hours > 0 {
        debug!("advanced {minutes} min to {clock}, {hours} hour(s) of decay");
    }
    hours
}

/// Reject a requested duration outside `0..=max`.
pub fn check_duration(what: &'static str, value: i64, max: i64) -> Result<u32, ActionError> {
    if !(0..=max).contains(&value) {
        return Err(ActionError::OutOfRange {
            what,
            value,
            min: 0,
            max,
        });
    }
    u32::try_from(value).map_err(|_| ActionError::OutOfRange {
        what,
        value,
        min: 0,
        max,
    })
}

/// Extra recovery from deliberately resting, on top of hourly decay.
pub fn apply_rest(player: &mut Player, rates: &NeedRates, hours: u32) {
    let hours = hours as i32;
    player
        .vitals
        .restore_energy(rates.rest_energy_per_hour * hours);
    player.wellness.update(
        -REST_STRESS_RELIEF_PER_HOUR * hours,
        0,
        -REST_FATIGUE_RELIEF_PER_HOUR * hours,
    );
}

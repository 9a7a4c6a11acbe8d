//! Game engine - owns the clock, the player and the world, and runs actions
//!
//! Every action goes through the same pipeline: the system validates and
//! mutates, the clock advances by the action's time cost (decaying needs
//! hour by hour), active quests are settled and a narrative line lands in
//! the message log. A rejected action commits nothing and costs no time.

use std::collections::VecDeque;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use yatala_logic::clock::GameTime;
use yatala_logic::factions::{Faction, FactionRank};
use yatala_logic::needs::Mood;
use yatala_logic::sentence::Release;

use crate::catalog::Catalog;
use crate::components::{Player, World, DURRIES};
use crate::config::SimConfig;
use crate::error::{ActionError, ErrorKind};
use crate::systems::*;

/// Bounded narrative log, oldest entries dropped first.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLog {
    entries: VecDeque<String>,
    limit: usize,
    pushed: u64,
}

impl MessageLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            pushed: 0,
        }
    }

    /// Rebuild from saved lines, keeping the newest `limit`.
    pub fn from_lines(lines: Vec<String>, limit: usize) -> Self {
        let mut log = Self::new(limit);
        for line in lines {
            log.push_line(line);
        }
        log
    }

    fn push_line(&mut self, line: String) {
        self.entries.push_back(line);
        self.pushed += 1;
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Append `text` stamped with `now`.
    pub fn push(&mut self, now: GameTime, text: &str) {
        self.push_line(format!("[{now}] {text}"));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Total lines ever pushed, including dropped ones.
    pub fn mark(&self) -> u64 {
        self.pushed
    }

    /// Lines pushed after `mark` that are still held.
    pub fn since(&self, mark: u64) -> Vec<&str> {
        let fresh = usize::try_from(self.pushed.saturating_sub(mark)).unwrap_or(usize::MAX);
        let skip = self.entries.len().saturating_sub(fresh);
        self.entries.iter().skip(skip).map(String::as_str).collect()
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

/// A discrete request from the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Move { to: String },
    Talk { npc: String },
    PickUp { item: String },
    UseItem { item: String },
    Buy { npc: String, item: String },
    Sell { npc: String, item: String },
    Craft { recipe: String },
    Manufacture { process: String },
    Launder { operation: String },
    Enroll { program: String },
    Treat { condition: String },
    Work { hours: i64 },
    Rest { hours: i64 },
    Wait { minutes: i64 },
    LearnRecipe { recipe: String },
    LearnProcess { process: String },
    LearnOperation { operation: String },
    JoinFaction { faction: Faction },
    TriggerRelationshipEvent { event: String },
    ParticipateInEvent { event: String },
    AcceptQuest { quest: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    /// Committed, but a random roll went against the player.
    Unlucky,
    /// A precondition failed; nothing changed.
    Rejected,
}

/// How a game ends. Once an ending is reached every further action is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Released(Release),
    /// Health ran out.
    Incapacitated,
}

impl Ending {
    pub fn label(self) -> &'static str {
        match self {
            Ending::Released(release) => release.label(),
            Ending::Incapacitated => "incapacitated",
        }
    }

    fn narration(self) -> &'static str {
        match self {
            Ending::Released(Release::Served) => {
                "You've served your sentence. The gate opens and you walk out."
            }
            Ending::Released(Release::Paroled) => {
                "The parole board signs off. You walk out early."
            }
            Ending::Incapacitated => "You collapse and don't get up. The screws carry you out.",
        }
    }
}

/// Observable state after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub time: GameTime,
    pub location: String,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub max_energy: i32,
    pub hunger: i32,
    pub hygiene: i32,
    pub stress: i32,
    pub hope: i32,
    pub fatigue: i32,
    pub mood: Mood,
    pub clean_money: u64,
    pub dirty_money: u64,
    pub durries: u32,
    pub underground_reputation: i32,
    pub parole_progress: i32,
    pub days_served: u32,
    pub sentence_days: u32,
    pub carried_weight: f32,
    pub carry_capacity: f32,
    pub ending: Option<Ending>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub status: ActionStatus,
    /// Narrative lines produced by the action, newest last.
    pub message: String,
    /// Set when the action was rejected.
    pub kind: Option<ErrorKind>,
    pub state: StatusReport,
}

impl ActionResult {
    pub fn success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

fn status_of(resolution: Resolution) -> ActionStatus {
    if resolution.succeeded() {
        ActionStatus::Success
    } else {
        ActionStatus::Unlucky
    }
}

/// Main game engine
pub struct GameEngine<R: Rng = StdRng> {
    catalog: Catalog,
    config: SimConfig,
    clock: GameTime,
    player: Player,
    world: World,
    messages: MessageLog,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Start a new game, seeding from `config.seed` or from entropy.
    pub fn new(catalog: Catalog, config: SimConfig, player_name: &str) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(catalog, config, player_name, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Start a new game with an injected generator.
    pub fn with_rng(catalog: Catalog, config: SimConfig, player_name: &str, rng: R) -> Self {
        let clock = GameTime::new(1, config.start_hour, 0).unwrap_or_default();
        let mut player = Player::new(player_name, catalog.start_location.clone(), &config);
        let mut world = World::from_catalog(&catalog);
        if let Some(durries) = catalog.items.get(DURRIES) {
            let stash = durries.with_quantity(config.starting_durries);
            if config.starting_durries > 0 {
                if let Err(e) = player.inventory.add(stash.clone(), player.carry_capacity) {
                    warn!("starting durries didn't fit: {e}");
                    world.drop_item(&player.location, stash);
                }
            }
        }
        let accepted = auto_accept_quests(&mut player, &catalog);

        let mut messages = MessageLog::new(config.message_log_limit);
        let start = catalog
            .locations
            .get(&player.location)
            .map_or(player.location.as_str(), |l| l.name.as_str());
        messages.push(clock, &format!("{} arrives at {}.", player.name, start));
        for name in accepted {
            messages.push(clock, &format!("New quest: {name}"));
        }

        Self {
            catalog,
            config,
            clock,
            player,
            world,
            messages,
            rng,
        }
    }

    /// Resume from saved state.
    pub fn from_parts(
        catalog: Catalog,
        config: SimConfig,
        clock: GameTime,
        player: Player,
        world: World,
        messages: Vec<String>,
        rng: R,
    ) -> Self {
        let messages = MessageLog::from_lines(messages, config.message_log_limit);
        Self {
            catalog,
            config,
            clock,
            player,
            world,
            messages,
            rng,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> GameTime {
        self.clock
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct access for scripted setups.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub(crate) fn replace_state(
        &mut self,
        clock: GameTime,
        player: Player,
        world: World,
        messages: Vec<String>,
    ) {
        self.clock = clock;
        self.player = player;
        self.world = world;
        self.messages = MessageLog::from_lines(messages, self.config.message_log_limit);
    }

    pub fn quest_status(&self, quest_id: &str) -> Option<QuestStatus> {
        self.catalog
            .quests
            .get(quest_id)
            .map(|q| quest_status(&self.player, q))
    }

    pub fn status(&self) -> StatusReport {
        let p = &self.player;
        StatusReport {
            time: self.clock,
            location: p.location.clone(),
            level: p.progression.level(),
            health: p.vitals.health(),
            max_health: p.vitals.max_health(),
            energy: p.vitals.energy(),
            max_energy: p.vitals.max_energy(),
            hunger: p.vitals.hunger(),
            hygiene: p.vitals.hygiene(),
            stress: p.wellness.stress(),
            hope: p.wellness.hope(),
            fatigue: p.wellness.fatigue(),
            mood: p.wellness.mood(),
            clean_money: p.clean_money(),
            dirty_money: p.dirty_money(),
            durries: p.durries(),
            underground_reputation: p.underground_reputation(),
            parole_progress: p.parole_progress(),
            days_served: p.sentence.days_served(),
            sentence_days: p.sentence.length_days(),
            carried_weight: p.inventory.total_weight(),
            carry_capacity: p.carry_capacity,
            ending: self.ending(),
        }
    }

    /// The ending reached, if any. Collapsing takes precedence over release.
    pub fn ending(&self) -> Option<Ending> {
        if self.player.vitals.is_incapacitated() {
            Some(Ending::Incapacitated)
        } else {
            self.player.release().map(Ending::Released)
        }
    }

    // ── Pipeline ────────────────────────────────────────────────────────

    fn narrate(&mut self, text: &str) {
        self.messages.push(self.clock, text);
    }

    /// Charge an action's time, then settle quests.
    fn finish(&mut self, minutes: u32, text: &str) {
        self.narrate(text);
        self.pass_time(minutes);
    }

    fn pass_time(&mut self, minutes: u32) {
        let ended = self.ending().is_some();
        let day_before = self.clock.day();
        advance_time(&mut self.clock, &mut self.player, &self.config.needs, minutes);
        for day in day_before + 1..=self.clock.day() {
            self.narrate(&format!("Day {day} begins."));
            if let Some(out) = roll_random_event(&mut self.player, &self.catalog, &mut self.rng) {
                self.narrate_random_event(&out);
            }
        }
        if self.player.vitals.is_starving() {
            self.narrate("You're starving.");
        }
        let updates = evaluate_quests(&mut self.player, &self.catalog, &mut self.world, self.clock);
        for name in &updates.completed {
            self.narrate(&format!("Quest complete: {name}"));
        }
        for name in &updates.failed {
            self.narrate(&format!("Quest failed: {name}"));
        }
        for name in &updates.accepted {
            self.narrate(&format!("New quest: {name}"));
        }
        for name in &updates.dropped {
            self.narrate(&format!("You couldn't carry the {name}; it's on the ground."));
        }
        if let Some(ending) = self.ending().filter(|_| !ended) {
            info!("{} reached an ending on {}: {}", self.player.name, self.clock, ending.label());
            self.narrate(ending.narration());
        }
    }

    fn narrate_random_event(&mut self, out: &RandomEventOutcome) {
        if out.description.is_empty() {
            self.narrate(&format!("{}.", out.event_name));
        } else {
            self.narrate(&format!("{}: {}", out.event_name, out.description));
        }
        if out.searched {
            if out.confiscated.is_empty() {
                self.narrate("They find nothing.");
            } else {
                self.narrate(&format!("They take your {}.", out.confiscated.join(", ")));
            }
        }
        if out.damage_taken > 0 {
            self.narrate(&format!("You take {} damage.", out.damage_taken));
        }
    }

    /// Run one action and report what happened.
    pub fn perform(&mut self, action: Action) -> ActionResult {
        let mark = self.messages.mark();
        let outcome = self.dispatch(&action);
        let (status, kind) = match outcome {
            Ok(status) => (status, None),
            Err(err) => {
                debug!("{action:?} rejected: {err}");
                self.narrate(&err.to_string());
                (ActionStatus::Rejected, Some(err.kind()))
            }
        };
        ActionResult {
            status,
            message: self.messages.since(mark).join("\n"),
            kind,
            state: self.status(),
        }
    }

    fn dispatch(&mut self, action: &Action) -> Result<ActionStatus, ActionError> {
        if let Some(ending) = self.ending() {
            return Err(ActionError::GameOver(ending.label().to_string()));
        }
        let status = match action {
            Action::Move { to } => self.move_to(to).map(|_| ActionStatus::Success)?,
            Action::Talk { npc } => self.talk(npc).map(|_| ActionStatus::Success)?,
            Action::PickUp { item } => self.pick_up(item).map(|_| ActionStatus::Success)?,
            Action::UseItem { item } => self.use_item(item).map(|_| ActionStatus::Success)?,
            Action::Buy { npc, item } => self.buy(npc, item).map(|_| ActionStatus::Success)?,
            Action::Sell { npc, item } => self.sell(npc, item).map(|_| ActionStatus::Success)?,
            Action::Craft { recipe } => status_of(self.craft(recipe)?.resolution),
            Action::Manufacture { process } => {
                let out = self.manufacture(process)?;
                if out.busted {
                    ActionStatus::Unlucky
                } else {
                    status_of(out.resolution)
                }
            }
            Action::Launder { operation } => status_of(self.launder(operation)?.resolution),
            Action::Enroll { program } => self.enroll(program).map(|_| ActionStatus::Success)?,
            Action::Treat { condition } => match self.treat(condition)?.result {
                TreatmentResult::Cured => ActionStatus::Success,
                TreatmentResult::Recurred => ActionStatus::Unlucky,
            },
            Action::Work { hours } => self.work(*hours).map(|_| ActionStatus::Success)?,
            Action::Rest { hours } => self.rest(*hours).map(|_| ActionStatus::Success)?,
            Action::Wait { minutes } => self.wait(*minutes).map(|_| ActionStatus::Success)?,
            Action::LearnRecipe { recipe } => {
                self.learn_recipe(recipe).map(|_| ActionStatus::Success)?
            }
            Action::LearnProcess { process } => {
                self.learn_process(process).map(|_| ActionStatus::Success)?
            }
            Action::LearnOperation { operation } => {
                self.learn_operation(operation).map(|_| ActionStatus::Success)?
            }
            Action::JoinFaction { faction } => {
                self.join_faction(*faction).map(|_| ActionStatus::Success)?
            }
            Action::TriggerRelationshipEvent { event } => self
                .trigger_relationship_event(event)
                .map(|_| ActionStatus::Success)?,
            Action::ParticipateInEvent { event } => match self.participate_in_event(event)?.result {
                EventResult::Rewarded(_) => ActionStatus::Success,
                EventResult::WentWrong { .. } => ActionStatus::Unlucky,
            },
            Action::AcceptQuest { quest } => {
                self.accept_quest(quest).map(|_| ActionStatus::Success)?
            }
        };
        Ok(status)
    }

    // ── Movement and people ─────────────────────────────────────────────

    pub fn move_to(&mut self, location_id: &str) -> Result<u32, ActionError> {
        let here = self
            .catalog
            .locations
            .get(&self.player.location)
            .ok_or_else(|| ActionError::not_found("location", &self.player.location))?;
        let target = self
            .catalog
            .locations
            .get(location_id)
            .ok_or_else(|| ActionError::not_found("location", location_id))?;
        if !here.connects_to(&target.id) {
            return Err(ActionError::NotConnected {
                from: here.name.clone(),
                to: target.name.clone(),
            });
        }
        if !target.is_open_at(self.clock.hour()) {
            return Err(ActionError::LocationClosed {
                location: target.name.clone(),
                hour: self.clock.hour(),
            });
        }

        let mut text = format!("You head to the {}.", target.name);
        let present: Vec<&str> = self
            .catalog
            .npcs_at(&target.id)
            .map(|n| n.name.as_str())
            .collect();
        if !present.is_empty() {
            let verb = if present.len() == 1 { "is" } else { "are" };
            text.push_str(&format!(" {} {verb} here.", present.join(", ")));
        }
        let minutes = self.config.travel_minutes;
        self.player.location = target.id.clone();
        if self.player.visited_locations.insert(target.id.clone()) {
            self.player.stats.locations_visited = self.player.visited_locations.len() as u32;
        }
        self.finish(minutes, &text);
        Ok(minutes)
    }

    pub fn talk(&mut self, npc_id: &str) -> Result<TalkOutcome, ActionError> {
        let out = talk(&mut self.player, &self.catalog, npc_id, &mut self.rng)?;
        let text = format!("{}: \"{}\"", out.npc_name, out.line);
        self.finish(TALK_MINUTES, &text);
        Ok(out)
    }

    pub fn trigger_relationship_event(&mut self, event_id: &str) -> Result<usize, ActionError> {
        let touched =
            trigger_relationship_event(&mut self.player, &self.catalog, event_id, self.clock)?;
        let name = self
            .catalog
            .relationship_events
            .get(event_id)
            .map_or(event_id, |e| e.name.as_str())
            .to_string();
        self.finish(0, &format!("{name}."));
        Ok(touched)
    }

    pub fn join_faction(&mut self, faction: Faction) -> Result<FactionRank, ActionError> {
        let rank = join_faction(&mut self.player, &self.config, faction)?;
        let text = format!("You're with the {} now ({}).", faction.name(), rank.label());
        self.finish(0, &text);
        Ok(rank)
    }

    // ── Items and trade ─────────────────────────────────────────────────

    pub fn pick_up(&mut self, item_id: &str) -> Result<u32, ActionError> {
        let item = pick_up(&mut self.player, &mut self.world, item_id)?;
        let text = format!("You pick up {} x{}.", item.name, item.quantity);
        self.finish(1, &text);
        Ok(item.quantity)
    }

    pub fn use_item(&mut self, item_id: &str) -> Result<UseOutcome, ActionError> {
        let out = use_item(&mut self.player, &self.config, item_id)?;
        let text = if out.consumed {
            format!("You use the {}.", out.item_name)
        } else {
            format!("You read {}.", out.item_name)
        };
        self.finish(out.minutes, &text);
        Ok(out)
    }

    pub fn buy(&mut self, npc_id: &str, item_id: &str) -> Result<TradeOutcome, ActionError> {
        let out = buy(&mut self.player, &self.catalog, npc_id, item_id)?;
        let text = format!(
            "You buy {} from {} for {} durries.",
            out.item_name, out.npc_name, out.price
        );
        self.finish(TRADE_MINUTES, &text);
        Ok(out)
    }

    pub fn sell(&mut self, npc_id: &str, item_id: &str) -> Result<TradeOutcome, ActionError> {
        let out = sell(&mut self.player, &self.catalog, npc_id, item_id)?;
        let text = format!(
            "You sell {} to {} for {} durries.",
            out.item_name, out.npc_name, out.price
        );
        self.finish(TRADE_MINUTES, &text);
        Ok(out)
    }

    /// Hand the player catalog items directly, for scripted setups.
    pub fn give_item(&mut self, item_id: &str, quantity: u32) -> Result<(), ActionError> {
        let def = self
            .catalog
            .items
            .get(item_id)
            .ok_or_else(|| ActionError::not_found("item", item_id))?;
        self.player
            .inventory
            .add_units(def, quantity, self.player.carry_capacity)
    }

    // ── Economy ─────────────────────────────────────────────────────────

    pub fn craft(&mut self, recipe_id: &str) -> Result<CraftOutcome, ActionError> {
        let out = craft(
            &mut self.player,
            &self.catalog,
            &self.config,
            recipe_id,
            &mut self.rng,
        )?;
        let text = if out.resolution.succeeded() {
            format!("You craft {} x{}.", out.item_name, out.quantity)
        } else {
            format!("Your {} falls apart. The materials are wasted.", out.item_name)
        };
        self.finish(out.minutes, &text);
        Ok(out)
    }

    pub fn manufacture(&mut self, process_id: &str) -> Result<ManufactureOutcome, ActionError> {
        let out = manufacture(
            &mut self.player,
            &self.catalog,
            &self.config,
            process_id,
            &mut self.rng,
        )?;
        let text = match (out.resolution, out.busted) {
            (_, true) => format!("The screws find your {} and take the lot.", out.item_name),
            (Resolution::Succeeded, false) => {
                format!("The batch is done: {} x{}.", out.item_name, out.quantity)
            }
            (Resolution::Failed, false) => format!("The {} batch is ruined.", out.item_name),
        };
        self.finish(out.minutes, &text);
        Ok(out)
    }

    pub fn launder(&mut self, operation_id: &str) -> Result<LaunderOutcome, ActionError> {
        let out = launder(
            &mut self.player,
            &self.catalog,
            &self.config,
            operation_id,
            &mut self.rng,
        )?;
        let text = if out.resolution.succeeded() {
            format!("The money comes back clean: ${}.", out.returned)
        } else {
            format!("The wash goes bad. You lose an extra ${}.", out.penalty)
        };
        self.finish(out.minutes, &text);
        Ok(out)
    }

    pub fn work(&mut self, hours: i64) -> Result<WorkOutcome, ActionError> {
        let out = work(&mut self.player, &self.catalog, &self.config, hours)?;
        let text = format!("You put in a shift and earn ${}.", out.earned);
        self.finish(out.minutes, &text);
        Ok(out)
    }

    pub fn learn_recipe(&mut self, recipe_id: &str) -> Result<bool, ActionError> {
        let new = learn(
            &mut self.player.known_recipes,
            &self.catalog.recipes,
            "recipe",
            recipe_id,
        )?;
        self.finish(LEARN_MINUTES, &format!("You learn how to make {recipe_id}."));
        Ok(new)
    }

    pub fn learn_process(&mut self, process_id: &str) -> Result<bool, ActionError> {
        let new = learn(
            &mut self.player.known_processes,
            &self.catalog.processes,
            "process",
            process_id,
        )?;
        self.finish(LEARN_MINUTES, &format!("You learn the {process_id} process."));
        Ok(new)
    }

    pub fn learn_operation(&mut self, operation_id: &str) -> Result<bool, ActionError> {
        let new = learn(
            &mut self.player.known_operations,
            &self.catalog.operations,
            "operation",
            operation_id,
        )?;
        self.finish(LEARN_MINUTES, &format!("You learn the {operation_id} racket."));
        Ok(new)
    }

    // ── Rehabilitation and health ───────────────────────────────────────

    pub fn enroll(&mut self, program_id: &str) -> Result<EnrollOutcome, ActionError> {
        let out = enroll(&mut self.player, &self.catalog, program_id)?;
        match &out {
            EnrollOutcome::Completed { name, minutes } => {
                let text = format!("You complete {name}.");
                self.finish(*minutes, &text);
            }
            EnrollOutcome::AlreadyCompleted { name } => {
                let text = format!("You've already done {name}.");
                self.finish(0, &text);
            }
        }
        Ok(out)
    }

    /// Give the player a catalog condition. Returns false if already present.
    pub fn add_medical_condition(&mut self, condition_id: &str) -> Result<bool, ActionError> {
        let condition = self
            .catalog
            .conditions
            .get(condition_id)
            .cloned()
            .ok_or_else(|| ActionError::not_found("condition", condition_id))?;
        let name = condition.name.clone();
        let added = self.player.add_medical_condition(condition);
        if added {
            self.narrate(&format!("You've come down with {name}."));
        }
        Ok(added)
    }

    pub fn treat(&mut self, condition_id: &str) -> Result<TreatOutcome, ActionError> {
        let out = treat(&mut self.player, condition_id, &mut self.rng)?;
        let text = match out.result {
            TreatmentResult::Cured => format!("The {} clears up.", out.condition_name),
            TreatmentResult::Recurred => {
                format!("Treatment for {} doesn't take.", out.condition_name)
            }
        };
        self.finish(out.minutes, &text);
        Ok(out)
    }

    // ── Time ────────────────────────────────────────────────────────────

    pub fn wait(&mut self, minutes: i64) -> Result<u32, ActionError> {
        let minutes = check_duration("minutes", minutes, MAX_WAIT_MINUTES)?;
        self.finish(minutes, &format!("You wait {minutes} minutes."));
        Ok(minutes)
    }

    pub fn rest(&mut self, hours: i64) -> Result<u32, ActionError> {
        let hours = check_duration("hours", hours, MAX_REST_HOURS)?;
        self.finish(hours * 60, &format!("You rest for {hours} hours."));
        apply_rest(&mut self.player, &self.config.needs, hours);
        Ok(hours)
    }

    // ── Events and quests ───────────────────────────────────────────────

    pub fn participate_in_event(&mut self, event_id: &str) -> Result<EventOutcome, ActionError> {
        let out = participate_in_event(
            &mut self.player,
            &self.catalog,
            &mut self.world,
            self.clock,
            event_id,
            &mut self.rng,
        )?;
        let text = match &out.result {
            EventResult::Rewarded(_) => format!("{} goes off without a hitch.", out.event_name),
            EventResult::WentWrong { damage, .. } => {
                format!("{} turns ugly. You take {damage} damage.", out.event_name)
            }
        };
        self.finish(out.minutes, &text);
        Ok(out)
    }

    pub fn accept_quest(&mut self, quest_id: &str) -> Result<String, ActionError> {
        let name = accept_quest(&mut self.player, &self.catalog, quest_id)?;
        self.finish(0, &format!("New quest: {name}"));
        Ok(name)
    }
}

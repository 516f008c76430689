use std::collections::BTreeMap;

use tracing::debug;

use steelfront_protocol::{CaptureZone, GameEventBody, Team, TeamScore, UnitId, ZoneId};

use crate::constants::{CAPTURE_RATE_PER_SEC, ECONOMY_TICK_SECS, INCOME_PER_TICK};

/// Capture-capable units currently standing in a zone.
#[derive(Clone, Debug, Default)]
pub struct ZoneSurvey {
    pub entries: Vec<(UnitId, Team)>,
}

impl ZoneSurvey {
    fn count(&self, team: Team) -> usize {
        self.entries.iter().filter(|(_, t)| *t == team).count()
    }
}

#[derive(Clone, Debug)]
struct ZoneState {
    zone: CaptureZone,
    /// Capture-capable units known to be inside, by id.
    entries: BTreeMap<UnitId, Team>,
    contested: bool,
    /// Team whose sole presence is accruing `zone.capture_progress`.
    progress_team: Option<Team>,
}

/// Credits, capture zones, and victory scoring for one match.
#[derive(Debug)]
pub struct EconomyManager {
    credits_team1: u32,
    credits_team2: u32,
    score: TeamScore,
    victory_threshold: u32,
    income_per_tick: u32,
    economy_tick_secs: f32,
    accumulator: f32,
    zones: Vec<ZoneState>,
    winner: Option<Team>,
    pending_events: Vec<GameEventBody>,
}

impl EconomyManager {
    pub fn new(starting_credits: u32, victory_threshold: u32) -> Self {
        Self {
            credits_team1: starting_credits,
            credits_team2: starting_credits,
            score: TeamScore::default(),
            victory_threshold,
            income_per_tick: INCOME_PER_TICK,
            economy_tick_secs: ECONOMY_TICK_SECS,
            accumulator: 0.0,
            zones: Vec::new(),
            winner: None,
            pending_events: Vec::new(),
        }
    }

    pub fn with_economy_tick(mut self, income_per_tick: u32, economy_tick_secs: f32) -> Self {
        self.income_per_tick = income_per_tick;
        self.economy_tick_secs = economy_tick_secs;
        self
    }

    /// Adopt the map's capture zones.
    pub fn configure_zones(&mut self, zones: &[CaptureZone]) {
        self.zones = zones
            .iter()
            .map(|z| ZoneState {
                zone: z.clone(),
                entries: BTreeMap::new(),
                contested: false,
                progress_team: None,
            })
            .collect();
    }

    pub fn credits(&self, team: Team) -> u32 {
        match team {
            Team::Team1 => self.credits_team1,
            Team::Team2 => self.credits_team2,
        }
    }

    /// Deduct `cost` if affordable; a spend of exactly the balance succeeds
    /// and leaves zero.
    pub fn try_spend(&mut self, team: Team, cost: u32) -> bool {
        let credits = match team {
            Team::Team1 => &mut self.credits_team1,
            Team::Team2 => &mut self.credits_team2,
        };
        if *credits < cost {
            return false;
        }
        *credits -= cost;
        true
    }

    pub fn score(&self) -> TeamScore {
        self.score
    }

    pub fn victory_winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn zones(&self) -> impl Iterator<Item = &CaptureZone> {
        self.zones.iter().map(|z| &z.zone)
    }

    /// Advance the economy by one sim tick.
    ///
    /// `survey` reports the capture-capable units inside a zone; the manager
    /// diffs it against the previous tick to track entries/exits and the
    /// contested flag, and accrues capture progress for a sole occupier.
    /// Ownership never flips here; that is `apply_zone_capture`'s job.
    pub fn update(&mut self, dt: f32, mut survey: impl FnMut(&CaptureZone) -> ZoneSurvey) {
        for state in &mut self.zones {
            let seen = survey(&state.zone);

            // Maintain the entry map: add arrivals, drop departures.
            let mut still_inside: BTreeMap<UnitId, Team> = BTreeMap::new();
            for (id, team) in &seen.entries {
                still_inside.insert(id.clone(), *team);
                if !state.entries.contains_key(id) {
                    debug!(zone = %state.zone.id, unit = %id, "unit entered zone");
                }
            }
            state.entries = still_inside;

            let team1 = seen.count(Team::Team1);
            let team2 = seen.count(Team::Team2);
            let contested = team1 > 0 && team2 > 0;
            if contested && !state.contested {
                debug!(zone = %state.zone.id, "zone became contested");
            }
            state.contested = contested;

            // Sole presence accrues progress toward a flip; losing that
            // presence decays it at the same rate.
            let sole = match (team1, team2) {
                (n, 0) if n > 0 => Some(Team::Team1),
                (0, n) if n > 0 => Some(Team::Team2),
                _ => None,
            };
            match sole {
                Some(team) if state.zone.owner != Some(team) => {
                    if state.progress_team != Some(team) {
                        state.progress_team = Some(team);
                        state.zone.capture_progress = 0.0;
                    }
                    state.zone.capture_progress =
                        (state.zone.capture_progress + CAPTURE_RATE_PER_SEC * dt).min(100.0);
                }
                _ => {
                    state.zone.capture_progress =
                        (state.zone.capture_progress - CAPTURE_RATE_PER_SEC * dt).max(0.0);
                    if state.zone.capture_progress == 0.0 {
                        state.progress_team = None;
                    }
                }
            }
        }

        // Economy ticks fire on an accumulator so dt jitter cannot skew
        // income between nodes.
        self.accumulator += dt;
        while self.accumulator >= self.economy_tick_secs {
            self.accumulator -= self.economy_tick_secs;
            self.fire_economy_tick();
        }
    }

    /// Zones whose capture progress is complete, ready for the
    /// authoritative caller to flip.
    pub fn zones_ready_to_flip(&self) -> Vec<(ZoneId, Team)> {
        self.zones
            .iter()
            .filter(|z| z.zone.capture_progress >= 100.0)
            .filter_map(|z| {
                z.progress_team
                    .filter(|team| z.zone.owner != Some(*team))
                    .map(|team| (z.zone.id.clone(), team))
            })
            .collect()
    }

    /// Authoritative ownership change. Resets progress and queues the
    /// broadcast event. Returns false for an unknown zone.
    pub fn apply_zone_capture(&mut self, zone_id: &ZoneId, team: Team) -> bool {
        let Some(state) = self.zones.iter_mut().find(|z| z.zone.id == *zone_id) else {
            return false;
        };
        state.zone.owner = Some(team);
        state.zone.capture_progress = 0.0;
        state.progress_team = None;
        debug!(zone = %zone_id, ?team, "zone captured");
        self.pending_events.push(GameEventBody::ZoneCaptured {
            zone: zone_id.clone(),
            team,
        });
        true
    }

    fn fire_economy_tick(&mut self) {
        // team1 accrues first; this order is the documented victory
        // tie-break when both sides cross the threshold on the same tick.
        for team in Team::IN_ORDER {
            let zone_points: u32 = self
                .zones
                .iter()
                .filter(|z| z.zone.owner == Some(team))
                .map(|z| z.zone.points_per_tick)
                .sum();

            let income = self.income_per_tick + zone_points;
            match team {
                Team::Team1 => self.credits_team1 += income,
                Team::Team2 => self.credits_team2 += income,
            }
            self.score.add(team, zone_points);

            if self.winner.is_none() && self.score.get(team) >= self.victory_threshold {
                self.winner = Some(team);
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<GameEventBody> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steelfront_protocol::Vec2;

    fn zone(id: &str, points: u32, owner: Option<Team>) -> CaptureZone {
        CaptureZone {
            id: ZoneId::from(id),
            center: Vec2::new(50.0, 50.0),
            width: 20.0,
            height: 20.0,
            owner,
            capture_progress: 0.0,
            points_per_tick: points,
        }
    }

    fn survey_of(entries: &[(&str, Team)]) -> ZoneSurvey {
        ZoneSurvey {
            entries: entries
                .iter()
                .map(|(id, team)| (UnitId::from(*id), *team))
                .collect(),
        }
    }

    #[test]
    fn income_accrues_on_economy_ticks() {
        let mut economy = EconomyManager::new(100, 2000).with_economy_tick(10, 4.0);
        economy.configure_zones(&[zone("alpha", 5, Some(Team::Team1))]);

        // 3.99 seconds: no tick yet.
        economy.update(3.99, |_| ZoneSurvey::default());
        assert_eq!(economy.credits(Team::Team1), 100);

        // Crossing 4 s fires exactly one tick.
        economy.update(0.02, |_| ZoneSurvey::default());
        assert_eq!(economy.credits(Team::Team1), 100 + 10 + 5);
        assert_eq!(economy.credits(Team::Team2), 100 + 10);
        assert_eq!(economy.score(), TeamScore { team1: 5, team2: 0 });
    }

    #[test]
    fn victory_fires_after_enough_zone_ticks() {
        // pointsPerTick 5, threshold 20 → victory on the 4th economy tick.
        let mut economy = EconomyManager::new(0, 20).with_economy_tick(10, 4.0);
        economy.configure_zones(&[zone("alpha", 5, Some(Team::Team1))]);

        for _ in 0..3 {
            economy.update(4.0, |_| ZoneSurvey::default());
            assert_eq!(economy.victory_winner(), None);
        }
        economy.update(4.0, |_| ZoneSurvey::default());
        assert_eq!(economy.victory_winner(), Some(Team::Team1));
        assert_eq!(economy.score().team1, 20);
    }

    #[test]
    fn simultaneous_threshold_goes_to_team1() {
        let mut economy = EconomyManager::new(0, 10).with_economy_tick(0, 1.0);
        economy.configure_zones(&[
            zone("a", 10, Some(Team::Team2)),
            zone("b", 10, Some(Team::Team1)),
        ]);

        economy.update(1.0, |_| ZoneSurvey::default());
        // Both teams reach 10 on the same tick; team1 accrues first.
        assert_eq!(economy.victory_winner(), Some(Team::Team1));
    }

    #[test]
    fn sole_presence_does_not_flip_ownership() {
        let mut economy = EconomyManager::new(0, 2000);
        economy.configure_zones(&[zone("alpha", 5, None)]);

        // One tick of sole presence accrues progress but never ownership.
        economy.update(1.0 / 60.0, |_| survey_of(&[("u0", Team::Team1)]));
        let z = economy.zones().next().unwrap();
        assert_eq!(z.owner, None);
        assert!(z.capture_progress > 0.0);
        assert!(economy.zones_ready_to_flip().is_empty());
    }

    #[test]
    fn contested_zone_stalls_and_capture_is_explicit() {
        let mut economy = EconomyManager::new(0, 2000);
        economy.configure_zones(&[zone("alpha", 5, None)]);

        // Ten seconds of sole presence completes the progress bar.
        for _ in 0..600 {
            economy.update(1.0 / 60.0, |_| survey_of(&[("u0", Team::Team1)]));
        }
        let ready = economy.zones_ready_to_flip();
        assert_eq!(ready, vec![(ZoneId::from("alpha"), Team::Team1)]);

        assert!(economy.apply_zone_capture(&ZoneId::from("alpha"), Team::Team1));
        let z = economy.zones().next().unwrap();
        assert_eq!(z.owner, Some(Team::Team1));
        assert_eq!(z.capture_progress, 0.0);
        let events = economy.take_events();
        assert!(matches!(
            events.as_slice(),
            [GameEventBody::ZoneCaptured { team: Team::Team1, .. }]
        ));

        // A contested zone accrues nothing.
        economy.update(1.0 / 60.0, |_| {
            survey_of(&[("u1", Team::Team1), ("u2", Team::Team2)])
        });
        let z = economy.zones().next().unwrap();
        assert_eq!(z.capture_progress, 0.0);
    }
}

use crate::catalog::PrizeDefinition;
use crate::config::GameConfig;
use crate::entities::play_record_entity as records;
use crate::error::{AppError, AppResult};
use crate::models::{PlayOutcomeResponse, PlayRequest, ResetResponse, Role};
use crate::services::{BatchPacing, HistoryService, InventoryService, SettingsService};
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use std::sync::Arc;
use tokio::sync::Mutex;

const MS_PER_DAY: i64 = 86_400_000;

/// The play authority: decides every outcome and owns the pacing counters.
///
/// All plays serialize on one async lock around the read-decide-write
/// sequence, so the duplicate check, the batch counters and the stock counts
/// can never interleave between competing kiosks. The record insert itself
/// runs in a transaction; counters only advance after the commit.
#[derive(Clone)]
pub struct PlayService {
    pool: DatabaseConnection,
    history: HistoryService,
    inventory: InventoryService,
    settings: SettingsService,
    game: GameConfig,
    pacing: Arc<Mutex<BatchPacing>>,
}

impl PlayService {
    /// Builds the service, reconstructing pacing state from the stored
    /// history so a restart continues the event where it left off.
    pub async fn load(
        pool: DatabaseConnection,
        history: HistoryService,
        inventory: InventoryService,
        settings: SettingsService,
        game: GameConfig,
    ) -> AppResult<Self> {
        let won_flags = history.won_flags_in_order().await?;
        let pacing = BatchPacing::rebuild(game.batch_size, game.prizes_per_batch, won_flags);
        log::info!(
            "Pacing state rebuilt from history: {} plays on record",
            pacing.total_plays()
        );

        Ok(Self {
            pool,
            history,
            inventory,
            settings,
            game,
            pacing: Arc::new(Mutex::new(pacing)),
        })
    }

    /// Runs one play to a terminal outcome:
    /// 1. Reject repeat plays for non-test participants
    /// 2. Capture tenure, emergency flag and current stock
    /// 3. Apply the elimination rules and (maybe) draw a prize
    /// 4. Commit the record, then advance the pacing counters
    pub async fn play(&self, request: PlayRequest) -> AppResult<PlayOutcomeResponse> {
        let participant_id = request.id.trim().to_string();
        if participant_id.is_empty() {
            return Err(AppError::ValidationError(
                "Participant id must not be empty".to_string(),
            ));
        }
        let participant_name = request.name.trim().to_string();
        if participant_name.is_empty() {
            return Err(AppError::ValidationError(
                "Participant name must not be empty".to_string(),
            ));
        }

        let is_test = self.game.is_test_participant(&participant_id);

        // Single-writer section.
        let mut pacing = self.pacing.lock().await;

        let txn = self.pool.begin().await?;

        if !is_test && self.history.has_played(&txn, &participant_id).await? {
            return Err(AppError::AlreadyPlayed);
        }

        let now = Utc::now();
        let tenure_days = request.hire_date.map(|hired| tenure_days(now, hired));

        // Re-read per play; a cached flag must not outlive one decision.
        let emergency = self.settings.emergency_mode(&txn).await;
        let available = self.inventory.available(&txn).await;

        let context = DecisionContext {
            role: request.role,
            tenure_days,
            is_test,
            emergency,
            pacing_admits: pacing.admit_win(),
            min_tenure_days: self.game.min_tenure_days,
            win_probability: self.game.win_probability,
        };
        let decision = decide(&context, &available, &mut rand::thread_rng());

        self.history
            .append(
                &txn,
                records::ActiveModel {
                    participant_id: Set(participant_id),
                    participant_name: Set(participant_name),
                    tenure_days: Set(tenure_days),
                    won: Set(decision.win),
                    prize: Set(decision.prize.clone()),
                    ..Default::default()
                },
            )
            .await?;

        // The outcome only exists once it is durable. On failure nothing was
        // consumed and the caller gets a retryable error.
        txn.commit().await?;

        pacing.record_play(decision.win);

        Ok(PlayOutcomeResponse {
            win: decision.win,
            prize: decision.prize,
            tenure_days,
        })
    }

    /// Administrative reset: clears the ledger and zeroes the pacing
    /// counters in one serialized step. The empty store is a valid starting
    /// state for the engine.
    pub async fn reset(&self) -> AppResult<ResetResponse> {
        let mut pacing = self.pacing.lock().await;
        let deleted = self.history.clear_all(&self.pool).await?;
        pacing.reset();
        log::info!("History cleared, {deleted} records removed");
        Ok(ResetResponse {
            deleted_records: deleted,
        })
    }
}

/// Inputs to one win decision, all captured inside the play transaction.
#[derive(Debug, Clone)]
struct DecisionContext {
    role: Role,
    tenure_days: Option<i64>,
    is_test: bool,
    emergency: bool,
    pacing_admits: bool,
    min_tenure_days: i64,
    win_probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Decision {
    win: bool,
    prize: Option<String>,
}

impl Decision {
    fn lose() -> Self {
        Decision {
            win: false,
            prize: None,
        }
    }
}

/// Ordered elimination rules; the first rule that applies settles the play.
///
/// Test identifiers skip the pacing guard but not the stock guard; emergency
/// mode skips only the probability draw. Stock exhaustion loses
/// unconditionally, overriding both forced-win paths.
fn decide<R: Rng>(ctx: &DecisionContext, available: &[PrizeDefinition], rng: &mut R) -> Decision {
    if ctx.role == Role::Director {
        return Decision::lose();
    }
    if let Some(tenure) = ctx.tenure_days
        && tenure < ctx.min_tenure_days
    {
        return Decision::lose();
    }
    if !ctx.is_test && !ctx.pacing_admits {
        return Decision::lose();
    }
    if available.is_empty() {
        return Decision::lose();
    }

    let win = ctx.is_test || ctx.emergency || rng.gen_range(0.0..1.0) < ctx.win_probability;
    if !win {
        return Decision::lose();
    }

    // Uniform over the stock as it stands right now, not an earlier snapshot.
    let prize = available[rng.gen_range(0..available.len())].name.clone();
    Decision {
        win: true,
        prize: Some(prize),
    }
}

/// Tenure in whole days between the hire date (taken at midnight UTC) and
/// now, rounded up.
fn tenure_days(now: DateTime<Utc>, hire_date: NaiveDate) -> i64 {
    let hired_at = hire_date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();
    let elapsed_ms = (now - hired_at).num_milliseconds().abs();
    (elapsed_ms + MS_PER_DAY - 1) / MS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inventory_service::derive_available;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stocked(names: &[&str]) -> Vec<PrizeDefinition> {
        names
            .iter()
            .map(|name| PrizeDefinition {
                name: name.to_string(),
                total: 10,
            })
            .collect()
    }

    fn eligible_context() -> DecisionContext {
        DecisionContext {
            role: Role::Employee,
            tenure_days: Some(400),
            is_test: false,
            emergency: false,
            pacing_admits: true,
            min_tenure_days: 90,
            win_probability: 0.15,
        }
    }

    #[test]
    fn test_director_never_wins() {
        let available = stocked(&["Bono $500 MXN"]);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                role: Role::Director,
                emergency: true,
                is_test: true,
                win_probability: 1.0,
                ..eligible_context()
            };
            assert_eq!(decide(&ctx, &available, &mut rng), Decision::lose());
        }
    }

    #[test]
    fn test_short_tenure_never_wins() {
        let available = stocked(&["Bono $500 MXN"]);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                tenure_days: Some(89),
                emergency: true,
                win_probability: 1.0,
                ..eligible_context()
            };
            assert_eq!(decide(&ctx, &available, &mut rng), Decision::lose());
        }
    }

    #[test]
    fn test_tenure_exactly_at_threshold_is_eligible() {
        let available = stocked(&["Bono $500 MXN"]);
        let mut rng = StdRng::seed_from_u64(7);
        let ctx = DecisionContext {
            tenure_days: Some(90),
            emergency: true,
            ..eligible_context()
        };
        assert!(decide(&ctx, &available, &mut rng).win);
    }

    #[test]
    fn test_missing_hire_date_skips_tenure_rule() {
        let available = stocked(&["Bono $500 MXN"]);
        let mut rng = StdRng::seed_from_u64(7);
        let ctx = DecisionContext {
            tenure_days: None,
            emergency: true,
            ..eligible_context()
        };
        assert!(decide(&ctx, &available, &mut rng).win);
    }

    #[test]
    fn test_pacing_guard_blocks_even_emergency() {
        let available = stocked(&["Bono $500 MXN"]);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                pacing_admits: false,
                emergency: true,
                win_probability: 1.0,
                ..eligible_context()
            };
            assert_eq!(decide(&ctx, &available, &mut rng), Decision::lose());
        }
    }

    #[test]
    fn test_test_id_bypasses_pacing_but_not_stock() {
        let available = stocked(&["Bono $500 MXN"]);
        let mut rng = StdRng::seed_from_u64(3);
        let ctx = DecisionContext {
            is_test: true,
            pacing_admits: false,
            win_probability: 0.0,
            ..eligible_context()
        };
        assert!(decide(&ctx, &available, &mut rng).win);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(decide(&ctx, &[], &mut rng), Decision::lose());
    }

    #[test]
    fn test_empty_stock_beats_every_override() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                is_test: true,
                emergency: true,
                win_probability: 1.0,
                ..eligible_context()
            };
            assert_eq!(decide(&ctx, &[], &mut rng), Decision::lose());
        }
    }

    #[test]
    fn test_emergency_forces_win_for_eligible_participant() {
        let available = stocked(&["Bono $500 MXN", "Termo Premium"]);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                emergency: true,
                win_probability: 0.0,
                ..eligible_context()
            };
            let decision = decide(&ctx, &available, &mut rng);
            assert!(decision.win);
            assert!(decision.prize.is_some());
        }
    }

    #[test]
    fn test_zero_probability_never_wins_without_override() {
        let available = stocked(&["Bono $500 MXN"]);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                win_probability: 0.0,
                ..eligible_context()
            };
            assert_eq!(decide(&ctx, &available, &mut rng), Decision::lose());
        }
    }

    #[test]
    fn test_full_probability_always_wins() {
        let available = stocked(&["Bono $500 MXN"]);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                win_probability: 1.0,
                ..eligible_context()
            };
            let decision = decide(&ctx, &available, &mut rng);
            assert_eq!(decision.prize.as_deref(), Some("Bono $500 MXN"));
        }
    }

    #[test]
    fn test_prize_draw_stays_inside_available_set() {
        let available = stocked(&["A", "B", "C"]);
        let names: Vec<&str> = available.iter().map(|p| p.name.as_str()).collect();
        for seed in 0..128 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = DecisionContext {
                emergency: true,
                ..eligible_context()
            };
            let decision = decide(&ctx, &available, &mut rng);
            assert!(names.contains(&decision.prize.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_batch_of_27_with_certain_probability_caps_at_3() {
        // 27 eligible plays, win probability 1.0, cap 3 per 27-play batch:
        // exactly the first 3 plays win.
        let available = stocked(&["Bono $500 MXN"]);
        let mut pacing = BatchPacing::new(27, 3);
        let mut rng = StdRng::seed_from_u64(11);
        let mut outcomes = Vec::new();

        for _ in 0..27 {
            let ctx = DecisionContext {
                win_probability: 1.0,
                pacing_admits: pacing.admit_win(),
                ..eligible_context()
            };
            let decision = decide(&ctx, &available, &mut rng);
            pacing.record_play(decision.win);
            outcomes.push(decision.win);
        }

        assert_eq!(outcomes.iter().filter(|w| **w).count(), 3);
        assert!(outcomes[..3].iter().all(|w| *w));
        assert!(outcomes[3..].iter().all(|w| !*w));
    }

    #[test]
    fn test_single_stock_prize_is_never_awarded_twice() {
        // Two eligible plays against a one-unit prize with emergency mode on.
        // The ledger between decisions removes the prize for the second play,
        // which must lose once nothing else is in stock.
        let catalog = vec![PrizeDefinition {
            name: "Bono $500 MXN".to_string(),
            total: 1,
        }];
        let mut winning_names: Vec<String> = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut awarded = 0;

        for _ in 0..2 {
            let available = derive_available(&catalog, &winning_names);
            let ctx = DecisionContext {
                emergency: true,
                ..eligible_context()
            };
            let decision = decide(&ctx, &available, &mut rng);
            if let Some(prize) = decision.prize {
                winning_names.push(prize);
                awarded += 1;
            }
        }

        assert_eq!(awarded, 1);
    }

    #[test]
    fn test_tenure_days_rounds_up() {
        let hire = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let midnight = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(tenure_days(midnight, hire), 0);

        let one_second_in = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(tenure_days(one_second_in, hire), 1);

        let ninety_days = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(tenure_days(ninety_days, hire), 90);

        let ninety_days_and_change = Utc.with_ymd_and_hms(2026, 4, 1, 8, 30, 0).unwrap();
        assert_eq!(tenure_days(ninety_days_and_change, hire), 91);
    }

    #[test]
    fn test_tenure_days_handles_future_hire_date() {
        // Directory exports occasionally carry onboarding dates ahead of the
        // event; the absolute difference keeps the value non-negative.
        let hire = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();
        assert!(tenure_days(now, hire) > 0);
    }
}

//! # Checkout Session
//!
//! Drives one checkout from parsed lines to a finished [`PurchaseResult`],
//! suspending whenever the buyer has to answer a yes/no question.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              ┌──────────────┐  next line                                │
//! │   advance ──►│  Processing  │◄──────────────────────────┐               │
//! │              └──────┬───────┘                           │               │
//! │          ┌──────────┼──────────────┬────────────┐       │               │
//! │          ▼          ▼              ▼            │       │               │
//! │  AwaitingTopUp  AwaitingShortfall  (allocate) ──┘       │               │
//! │          │      Confirm │                               │               │
//! │          └── answer ────┴───────────────────────────────┘               │
//! │                                                                         │
//! │   no lines left ──► AwaitingMembership ── answer ──► Completed          │
//! │                                                                         │
//! │   ProductNotFound / InsufficientStock at any point ──► Aborted          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staging
//! Lines are allocated against a private copy of the catalog. The copy is
//! written back only when the session completes, so an aborted or abandoned
//! checkout leaves stock exactly as it was.
//!
//! ## Driving a Session
//! Interactive front ends implement [`ConfirmationPort`] and call
//! [`run_checkout`]. Anything else (a test harness, a network handler) can
//! call [`CheckoutSession::advance`] and [`CheckoutSession::answer`]
//! directly.

use std::collections::VecDeque;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::allocation::allocate;
use crate::catalog::Catalog;
use crate::eligibility::{Decision, EligibilityResolver, EligibleLine, ShortfallNotice, TopUpOffer};
use crate::error::{CoreError, CoreResult};
use crate::membership::MembershipDiscount;
use crate::receipt::PurchaseResult;
use crate::types::PurchaseLine;

// =============================================================================
// Prompts
// =============================================================================

/// A yes/no question put to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    /// Free units can be added to complete a promotion set.
    TopUp { name: String, free_units: u32 },
    /// Part of the line will be sold without the promotion.
    Shortfall { name: String, quantity: u32 },
    Membership,
    ContinueShopping,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::TopUp { name, free_units } => write!(
                f,
                "You can get {free_units} more {name} for free. Would you like to add them? (Y/N)"
            ),
            Prompt::Shortfall { name, quantity } => write!(
                f,
                "{quantity} {name} will be sold without the promotion. Would you like to buy them anyway? (Y/N)"
            ),
            Prompt::Membership => write!(f, "Would you like to apply the membership discount? (Y/N)"),
            Prompt::ContinueShopping => write!(f, "Would you like to buy anything else? (Y/N)"),
        }
    }
}

/// Where yes/no answers come from.
///
/// Implementations validate the raw answer themselves and only return once
/// they have a clean `true`/`false`, or a failure of their own.
pub trait ConfirmationPort {
    type Error;

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool, Self::Error>;
}

// =============================================================================
// Session
// =============================================================================

/// Where the session currently stands. Waiting states carry what is needed
/// to resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Processing,
    AwaitingTopUp(TopUpOffer),
    AwaitingShortfallConfirm(ShortfallNotice),
    AwaitingMembership,
    Completed,
    Aborted,
}

/// What the caller has to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Ask the buyer and pass the answer to [`CheckoutSession::answer`].
    Prompt(Prompt),
    Completed(PurchaseResult),
}

/// One buyer's checkout over a catalog.
#[derive(Debug)]
pub struct CheckoutSession<'a> {
    catalog: &'a mut Catalog,
    staged: Catalog,
    pending: VecDeque<PurchaseLine>,
    result: PurchaseResult,
    state: SessionState,
    today: NaiveDate,
    membership: MembershipDiscount,
}

impl<'a> CheckoutSession<'a> {
    /// Starts a checkout for already validated `lines`, processed in order.
    pub fn new(
        catalog: &'a mut Catalog,
        lines: Vec<PurchaseLine>,
        today: NaiveDate,
        membership: MembershipDiscount,
    ) -> Self {
        let staged = catalog.clone();

        CheckoutSession {
            catalog,
            staged,
            pending: lines.into(),
            result: PurchaseResult::new(),
            state: SessionState::Processing,
            today,
            membership,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Totals accumulated so far.
    pub fn result(&self) -> &PurchaseResult {
        &self.result
    }

    /// Returns true once the session completed or aborted.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Completed | SessionState::Aborted)
    }

    /// Runs lines until the buyer must answer something or the checkout is
    /// done. While a prompt is pending, returns that prompt again.
    ///
    /// ## Errors
    /// - `SessionClosed` once the session has finished
    /// - `ProductNotFound` / `InsufficientStock` abort the session
    pub fn advance(&mut self) -> CoreResult<Step> {
        if self.state == SessionState::Processing {
            return self.process_pending();
        }

        match &self.state {
            SessionState::Processing => Err(CoreError::NoPendingPrompt),
            SessionState::AwaitingTopUp(offer) => Ok(Step::Prompt(top_up_prompt(offer))),
            SessionState::AwaitingShortfallConfirm(notice) => {
                Ok(Step::Prompt(shortfall_prompt(notice)))
            }
            SessionState::AwaitingMembership => Ok(Step::Prompt(Prompt::Membership)),
            SessionState::Completed | SessionState::Aborted => Err(CoreError::SessionClosed),
        }
    }

    /// Resumes the session with the buyer's answer to the pending prompt.
    ///
    /// A declined shortfall cancels only that line; it is listed in
    /// [`PurchaseResult::cancelled`] and processing moves on.
    ///
    /// ## Errors
    /// - `NoPendingPrompt` if nothing was asked
    /// - `SessionClosed` once the session has finished
    /// - `ProductNotFound` / `InsufficientStock` abort the session
    pub fn answer(&mut self, accepted: bool) -> CoreResult<Step> {
        match std::mem::replace(&mut self.state, SessionState::Processing) {
            SessionState::AwaitingTopUp(offer) => {
                let resumed = self.resolver().after_top_up(offer, accepted);
                let decision = resumed.map_err(|e| self.abort(e))?;
                match self.apply(decision)? {
                    Some(prompt) => Ok(Step::Prompt(prompt)),
                    None => self.process_pending(),
                }
            }
            SessionState::AwaitingShortfallConfirm(notice) => {
                let resumed = self.resolver().after_shortfall(notice, accepted);
                match resumed {
                    Ok(line) => self.allocate_line(line)?,
                    Err(CoreError::PurchaseCancelled { name }) => self.result.record_cancelled(name),
                    Err(other) => return Err(self.abort(other)),
                }
                self.process_pending()
            }
            SessionState::AwaitingMembership => {
                if accepted {
                    self.result.membership_discount =
                        self.membership.discount(self.result.non_promotion_total);
                }
                Ok(self.complete())
            }
            SessionState::Processing => Err(CoreError::NoPendingPrompt),
            closed @ (SessionState::Completed | SessionState::Aborted) => {
                self.state = closed;
                Err(CoreError::SessionClosed)
            }
        }
    }

    fn resolver(&self) -> EligibilityResolver<'_> {
        EligibilityResolver::new(&self.staged, self.today)
    }

    fn process_pending(&mut self) -> CoreResult<Step> {
        while let Some(line) = self.pending.pop_front() {
            let resolved = self.resolver().resolve(&line);
            let decision = resolved.map_err(|e| self.abort(e))?;

            if let Some(prompt) = self.apply(decision)? {
                return Ok(Step::Prompt(prompt));
            }
        }

        if self.result.is_empty() {
            return Ok(self.complete());
        }

        self.state = SessionState::AwaitingMembership;
        Ok(Step::Prompt(Prompt::Membership))
    }

    /// Allocates a resolved line, or parks the session on a prompt.
    fn apply(&mut self, decision: Decision) -> CoreResult<Option<Prompt>> {
        match decision {
            Decision::Proceed(line) => {
                self.allocate_line(line)?;
                Ok(None)
            }
            Decision::OfferTopUp(offer) => {
                let prompt = top_up_prompt(&offer);
                self.state = SessionState::AwaitingTopUp(offer);
                Ok(Some(prompt))
            }
            Decision::ConfirmShortfall(notice) => {
                let prompt = shortfall_prompt(&notice);
                self.state = SessionState::AwaitingShortfallConfirm(notice);
                Ok(Some(prompt))
            }
        }
    }

    fn allocate_line(&mut self, line: EligibleLine) -> CoreResult<()> {
        let allocation = allocate(&mut self.staged, &line, self.today).map_err(|e| self.abort(e))?;
        self.result.record(&allocation);
        Ok(())
    }

    fn abort(&mut self, err: CoreError) -> CoreError {
        self.state = SessionState::Aborted;
        self.pending.clear();
        err
    }

    fn complete(&mut self) -> Step {
        *self.catalog = std::mem::take(&mut self.staged);
        self.state = SessionState::Completed;
        Step::Completed(self.result.clone())
    }
}

fn top_up_prompt(offer: &TopUpOffer) -> Prompt {
    Prompt::TopUp {
        name: offer.line.name.clone(),
        free_units: offer.free_units,
    }
}

fn shortfall_prompt(notice: &ShortfallNotice) -> Prompt {
    Prompt::Shortfall {
        name: notice.line.name.clone(),
        quantity: notice.non_promotion_quantity,
    }
}

/// Runs `session` to completion, asking `port` at every prompt.
///
/// If the port fails, the session is left waiting and the catalog is
/// untouched.
pub fn run_checkout<P>(session: &mut CheckoutSession<'_>, port: &mut P) -> Result<PurchaseResult, P::Error>
where
    P: ConfirmationPort,
    P::Error: From<CoreError>,
{
    let mut step = session.advance()?;

    loop {
        match step {
            Step::Completed(result) => return Ok(result),
            Step::Prompt(prompt) => {
                let accepted = port.confirm(&prompt)?;
                step = session.answer(accepted)?;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{ProductRecord, PromotionRecord, StockPool};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn record(name: &str, price: i64, quantity: u32, promotion: Option<&str>) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            price,
            quantity,
            promotion: promotion.map(str::to_string),
        }
    }

    fn promotion(name: &str, buy: u32, get: u32) -> PromotionRecord {
        PromotionRecord {
            name: name.to_string(),
            buy,
            get,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        }
    }

    fn test_catalog(cola_promo_stock: u32) -> Catalog {
        Catalog::from_records(
            vec![
                record("Cola", 1_000, cola_promo_stock, Some("Soda 2+1")),
                record("Cola", 1_000, 10, None),
                record("Water", 500, 10, None),
                record("Chips", 1_500, 5, Some("MD Pick")),
                record("Chips", 1_500, 5, None),
            ],
            vec![promotion("Soda 2+1", 2, 1), promotion("MD Pick", 1, 1)],
        )
        .unwrap()
    }

    fn stock(catalog: &Catalog, name: &str) -> (u32, u32) {
        let entry = catalog.entry(name).unwrap();
        (
            entry.stock(StockPool::Promotional),
            entry.stock(StockPool::Regular),
        )
    }

    /// Answers prompts from a fixed script and records what was asked.
    struct ScriptedPort {
        answers: VecDeque<bool>,
        asked: Vec<Prompt>,
    }

    impl ScriptedPort {
        fn new(answers: &[bool]) -> Self {
            ScriptedPort {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum ScriptError {
        OutOfAnswers,
        Core(CoreError),
    }

    impl From<CoreError> for ScriptError {
        fn from(err: CoreError) -> Self {
            ScriptError::Core(err)
        }
    }

    impl ConfirmationPort for ScriptedPort {
        type Error = ScriptError;

        fn confirm(&mut self, prompt: &Prompt) -> Result<bool, ScriptError> {
            self.asked.push(prompt.clone());
            self.answers.pop_front().ok_or(ScriptError::OutOfAnswers)
        }
    }

    fn checkout(
        catalog: &mut Catalog,
        lines: Vec<PurchaseLine>,
        answers: &[bool],
    ) -> (Result<PurchaseResult, ScriptError>, Vec<Prompt>) {
        let mut port = ScriptedPort::new(answers);
        let mut session = CheckoutSession::new(catalog, lines, today(), MembershipDiscount::default());
        let result = run_checkout(&mut session, &mut port);
        (result, port.asked)
    }

    #[test]
    fn test_scenario_a() {
        let mut catalog = test_catalog(10);
        let (result, asked) = checkout(&mut catalog, vec![PurchaseLine::new("Cola", 6)], &[false]);
        let result = result.unwrap();

        assert_eq!(asked, vec![Prompt::Membership]);
        assert_eq!(result.total_price.won(), 6_000);
        assert_eq!(result.total_discount.won(), 2_000);
        assert_eq!(result.gift_quantity("Cola"), 2);
        assert_eq!(result.amount_due().won(), 4_000);
        assert_eq!(stock(&catalog, "Cola"), (4, 10));
    }

    #[test]
    fn test_scenario_b_with_membership() {
        let mut catalog = test_catalog(10);
        let (result, asked) = checkout(&mut catalog, vec![PurchaseLine::new("Water", 2)], &[true]);
        let result = result.unwrap();

        assert_eq!(asked, vec![Prompt::Membership]);
        assert_eq!(result.total_price.won(), 1_000);
        assert!(result.total_discount.is_zero());
        assert!(result.gift_items.is_empty());
        assert_eq!(result.non_promotion_total.won(), 1_000);
        assert_eq!(result.membership_discount.won(), 300);
        assert_eq!(result.amount_due().won(), 700);
        assert_eq!(stock(&catalog, "Water"), (0, 8));
    }

    #[test]
    fn test_scenario_c_declined_cancels_only_that_line() {
        let mut catalog = test_catalog(2);
        let lines = vec![PurchaseLine::new("Cola", 5), PurchaseLine::new("Water", 1)];
        let (result, asked) = checkout(&mut catalog, lines, &[false, false]);
        let result = result.unwrap();

        assert_eq!(
            asked,
            vec![
                Prompt::Shortfall {
                    name: "Cola".to_string(),
                    quantity: 3
                },
                Prompt::Membership,
            ]
        );
        assert_eq!(result.cancelled, vec!["Cola".to_string()]);
        assert_eq!(result.items.len(), 1);
        assert_eq!(stock(&catalog, "Cola"), (2, 10));
        assert_eq!(stock(&catalog, "Water"), (0, 9));
    }

    #[test]
    fn test_scenario_c_accepted() {
        let mut catalog = test_catalog(2);
        let (result, _) = checkout(&mut catalog, vec![PurchaseLine::new("Cola", 5)], &[true, false]);
        let result = result.unwrap();

        assert_eq!(result.total_price.won(), 5_000);
        assert!(result.total_discount.is_zero());
        assert_eq!(stock(&catalog, "Cola"), (0, 7));
    }

    #[test]
    fn test_scenario_d_top_up_accepted() {
        let mut catalog = test_catalog(10);
        let (result, asked) = checkout(&mut catalog, vec![PurchaseLine::new("Chips", 1)], &[true, false]);
        let result = result.unwrap();

        assert_eq!(
            asked[0],
            Prompt::TopUp {
                name: "Chips".to_string(),
                free_units: 1
            }
        );
        assert_eq!(result.items[0].quantity, 2);
        assert_eq!(result.total_discount.won(), 1_500);
        assert_eq!(result.gift_quantity("Chips"), 1);
        assert_eq!(result.amount_due().won(), 1_500);
        assert_eq!(stock(&catalog, "Chips"), (3, 5));
    }

    #[test]
    fn test_membership_excludes_promoted_lines() {
        let mut catalog = test_catalog(10);
        let lines = vec![PurchaseLine::new("Cola", 3), PurchaseLine::new("Water", 4)];
        let (result, _) = checkout(&mut catalog, lines, &[true]);
        let result = result.unwrap();

        assert_eq!(result.non_promotion_total.won(), 2_000);
        assert_eq!(result.membership_discount.won(), 600);
        assert_eq!(
            result.amount_due(),
            result.total_price - result.total_discount - result.membership_discount
        );
        assert_eq!(result.amount_due().won(), 5_000 - 1_000 - 600);
    }

    #[test]
    fn test_insufficient_stock_aborts_without_touching_catalog() {
        // Water is allocated first; Cola then fails on the regular pool
        let mut catalog = Catalog::from_records(
            vec![
                record("Water", 500, 10, None),
                record("Cola", 1_000, 2, Some("Soda 2+1")),
                record("Cola", 1_000, 0, None),
            ],
            vec![promotion("Soda 2+1", 2, 1)],
        )
        .unwrap();
        let before = catalog.clone();

        let lines = vec![PurchaseLine::new("Water", 3), PurchaseLine::new("Cola", 3)];
        let (result, _) = checkout(&mut catalog, lines, &[true]);

        assert!(matches!(
            result,
            Err(ScriptError::Core(CoreError::InsufficientStock { .. }))
        ));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_abandoned_session_leaves_stock() {
        let mut catalog = test_catalog(10);
        let before = catalog.clone();

        let (result, _) = checkout(&mut catalog, vec![PurchaseLine::new("Water", 2)], &[]);

        assert_eq!(result, Err(ScriptError::OutOfAnswers));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_state_machine_driven_directly() {
        let mut catalog = test_catalog(10);
        let mut session = CheckoutSession::new(
            &mut catalog,
            vec![PurchaseLine::new("Chips", 1), PurchaseLine::new("Water", 1)],
            today(),
            MembershipDiscount::new(1_000, Money::from_won(100)),
        );

        assert_eq!(session.answer(true), Err(CoreError::NoPendingPrompt));

        let step = session.advance().unwrap();
        assert!(matches!(step, Step::Prompt(Prompt::TopUp { .. })));
        assert!(matches!(session.state(), SessionState::AwaitingTopUp(_)));

        // Asking again repeats the pending prompt
        assert_eq!(session.advance().unwrap(), step);

        let step = session.answer(false).unwrap();
        assert_eq!(step, Step::Prompt(Prompt::Membership));
        assert_eq!(session.result().items.len(), 2);

        let Step::Completed(result) = session.answer(true).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(result.membership_discount.won(), 50);
        assert!(session.is_finished());
        assert_eq!(session.advance(), Err(CoreError::SessionClosed));
        assert_eq!(session.answer(true), Err(CoreError::SessionClosed));
    }

    #[test]
    fn test_all_lines_cancelled_completes_without_membership_prompt() {
        let mut catalog = test_catalog(2);
        let (result, asked) = checkout(&mut catalog, vec![PurchaseLine::new("Cola", 5)], &[false]);
        let result = result.unwrap();

        assert_eq!(asked.len(), 1);
        assert!(result.is_empty());
        assert_eq!(result.cancelled, vec!["Cola".to_string()]);
    }

    #[test]
    fn test_prompt_messages() {
        let prompt = Prompt::Shortfall {
            name: "Cola".to_string(),
            quantity: 3,
        };
        assert_eq!(
            prompt.to_string(),
            "3 Cola will be sold without the promotion. Would you like to buy them anyway? (Y/N)"
        );
        assert!(Prompt::Membership.to_string().ends_with("(Y/N)"));
    }
}

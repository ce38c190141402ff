//! Trading delegation bookkeeping.
//!
//! The estate can delegate a share of custodied value to an automated
//! trading counterparty. The core tracks contributions, mark-to-market value
//! and the profit split — strategy execution itself happens off-core.

use crate::error::EstateError;
use heirloom_types::{Amount, Identity, ProtocolParams, ShareBps, Timestamp};
use serde::{Deserialize, Serialize};

/// Coarse risk posture the delegate is instructed to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradingStrategy {
    Conservative,
    Balanced,
    Aggressive,
}

/// Parameters the owner fixes when enabling trading.
#[derive(Clone, Debug)]
pub struct TradingConfig {
    pub delegate: Identity,
    pub human_share: ShareBps,
    pub strategy: TradingStrategy,
    pub stop_loss: Option<ShareBps>,
    pub emergency_delay_hours: u32,
}

/// Revenue-split bookkeeping between the owner ("human" side) and the
/// delegated counterparty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TradingDelegate {
    pub delegate: Identity,
    pub human_share: ShareBps,
    pub ai_share: ShareBps,
    pub strategy: TradingStrategy,
    pub stop_loss: Option<ShareBps>,
    pub emergency_delay_hours: u32,

    /// Cumulative deposits, per side. Only ever increase.
    pub human_contribution: Amount,
    pub delegate_contribution: Amount,

    /// Mark-to-market value of the delegated pool.
    pub trading_value: Amount,
    /// Signed profit against total contributions, from the last mark.
    pub trading_profit: i128,
    /// Level above which reported value counts as fresh profit. Raised by
    /// contributions (principal is never profit) and reset by distribution,
    /// never by a mark alone.
    pub high_water_mark: Amount,

    pub enabled: bool,
    pub last_update_at: Timestamp,
    /// Set when the owner raises the two-phase emergency withdrawal.
    pub withdrawal_requested_at: Option<Timestamp>,
}

impl TradingDelegate {
    /// Validate the configuration and open a fresh delegation.
    pub fn open(
        cfg: TradingConfig,
        params: &ProtocolParams,
        now: Timestamp,
    ) -> Result<Self, EstateError> {
        if cfg.human_share < params.min_human_share || cfg.human_share > ShareBps::FULL {
            return Err(EstateError::InvalidShare(format!(
                "human share {} outside {}..=10000",
                cfg.human_share,
                params.min_human_share.bps()
            )));
        }
        if cfg.emergency_delay_hours < params.min_emergency_delay_hours
            || cfg.emergency_delay_hours > params.max_emergency_delay_hours
        {
            return Err(EstateError::InvalidDelay {
                given_hours: cfg.emergency_delay_hours,
                min: params.min_emergency_delay_hours,
                max: params.max_emergency_delay_hours,
            });
        }

        Ok(Self {
            delegate: cfg.delegate,
            ai_share: cfg.human_share.complement(),
            human_share: cfg.human_share,
            strategy: cfg.strategy,
            stop_loss: cfg.stop_loss,
            emergency_delay_hours: cfg.emergency_delay_hours,
            human_contribution: Amount::ZERO,
            delegate_contribution: Amount::ZERO,
            trading_value: Amount::ZERO,
            trading_profit: 0,
            high_water_mark: Amount::ZERO,
            enabled: true,
            last_update_at: now,
            withdrawal_requested_at: None,
        })
    }

    /// Pause without losing configuration.
    pub fn pause(&mut self, now: Timestamp) -> Result<(), EstateError> {
        if !self.enabled {
            return Err(EstateError::TradingNotEnabled);
        }
        self.enabled = false;
        self.last_update_at = now;
        Ok(())
    }

    /// Resume a paused delegation; everything configured at enable time
    /// still applies.
    pub fn resume(&mut self, now: Timestamp) -> Result<(), EstateError> {
        if self.enabled {
            return Err(EstateError::TradingAlreadyEnabled);
        }
        self.enabled = true;
        self.last_update_at = now;
        Ok(())
    }

    /// Record a contribution from one side. Caller has already moved the
    /// funds into the estate vault.
    pub fn record_contribution(
        &mut self,
        from_owner: bool,
        amount: Amount,
        now: Timestamp,
    ) {
        if from_owner {
            self.human_contribution = self
                .human_contribution
                .checked_add(amount)
                .expect("human contribution overflowed");
        } else {
            self.delegate_contribution = self
                .delegate_contribution
                .checked_add(amount)
                .expect("delegate contribution overflowed");
        }
        self.trading_value = self
            .trading_value
            .checked_add(amount)
            .expect("trading value overflowed");
        self.high_water_mark = self
            .high_water_mark
            .checked_add(amount)
            .expect("high-water mark overflowed");
        self.last_update_at = now;
    }

    /// Delegate-reported mark-to-market. Recomputes signed profit against
    /// total contributions; the high-water mark is deliberately untouched.
    pub fn mark_value(&mut self, new_value: Amount, now: Timestamp) {
        let contributions = self.total_contributions();
        self.trading_profit = new_value.raw() as i128 - contributions.raw() as i128;
        self.trading_value = new_value;
        self.last_update_at = now;
    }

    /// Value above the high-water mark that a distribution may pay out.
    pub fn distributable_profit(&self) -> Amount {
        self.trading_value.saturating_sub(self.high_water_mark)
    }

    /// Split a distributable profit: owner share truncates, delegate gets
    /// the remainder (so no unit is ever lost).
    pub fn split_profit(&self, profit: Amount) -> (Amount, Amount) {
        let human = self.human_share.of(profit);
        (human, profit.saturating_sub(human))
    }

    /// Settle a completed distribution of `profit`.
    pub fn settle_distribution(&mut self, profit: Amount, now: Timestamp) {
        self.trading_value = self.trading_value.saturating_sub(profit);
        self.high_water_mark = self.trading_value;
        self.last_update_at = now;
    }

    /// Owner's contribution-proportional slice of the current pool value,
    /// for emergency withdrawal. Truncates toward zero.
    pub fn owner_proportion(&self) -> Amount {
        let total = self.total_contributions();
        if total.is_zero() {
            return Amount::ZERO;
        }
        let value = self.trading_value.raw();
        let q = value / total.raw();
        let r = value % total.raw();
        Amount::new(
            q * self.human_contribution.raw() + r * self.human_contribution.raw() / total.raw(),
        )
    }

    pub fn total_contributions(&self) -> Amount {
        self.human_contribution
            .checked_add(self.delegate_contribution)
            .expect("contribution total overflowed")
    }
}

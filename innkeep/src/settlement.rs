//! Deposit settlement at check-out.
//!
//! [`Settlement::compute`] is a pure function of the total due, the amount
//! paid and the deposit held. It decides how much of the deposit goes back
//! to the guest and how much the guest still owes.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Which settlement rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementBranch {
    /// No deposit was held.
    NoDeposit,
    /// The deposit covers the outstanding balance; the rest is refunded.
    DepositCoversBalance,
    /// The deposit only covers part of the outstanding balance.
    DepositShortOfBalance,
    /// Nothing was outstanding; the whole deposit plus any overpayment is refunded.
    PaidInFull,
}

/// The outcome of settling a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Amount due for the stay.
    pub total_amount: Money,
    /// Sum of counted payments.
    pub total_paid: Money,
    /// Deposit held.
    pub deposit_held: Money,
    /// `total_amount - total_paid`; negative when overpaid.
    pub balance: Money,
    /// Amount to hand back to the guest.
    pub to_refund: Money,
    /// Amount the guest still owes.
    pub balance_owed: Money,
    /// `max(balance_owed, 0)`.
    pub final_balance_after_deposit: Money,
    /// Rule that applied.
    pub branch: SettlementBranch,
    /// Human-readable description of the outcome.
    pub note: String,
}

impl Settlement {
    /// Settles a reservation.
    ///
    /// Inputs are expected within [`Money::LIMIT`], which the lifecycle
    /// manager checks before settling.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Money, Settlement};
    ///
    /// let s = Settlement::compute(Money::new(1_000_000), Money::new(900_000), Money::new(400_000));
    /// assert_eq!(s.balance, Money::new(100_000));
    /// assert_eq!(s.to_refund, Money::new(300_000));
    /// assert_eq!(s.balance_owed, Money::ZERO);
    /// ```
    #[must_use]
    pub fn compute(total_amount: Money, total_paid: Money, deposit: Money) -> Self {
        let balance = total_amount - total_paid;

        let (branch, to_refund, owed, note) = if !deposit.is_positive() {
            let owed = balance.clamp_to_zero();
            let note = if owed.is_positive() {
                format!("No deposit held; guest owes {owed}")
            } else {
                "No deposit held; nothing owed".to_string()
            };
            (SettlementBranch::NoDeposit, Money::ZERO, owed, note)
        } else if balance.is_positive() {
            if deposit >= balance {
                let refund = deposit - balance;
                (
                    SettlementBranch::DepositCoversBalance,
                    refund,
                    Money::ZERO,
                    format!("Deposit of {deposit} covers the {balance} balance; refund {refund}"),
                )
            } else {
                let owed = balance - deposit;
                (
                    SettlementBranch::DepositShortOfBalance,
                    Money::ZERO,
                    owed,
                    format!("Deposit of {deposit} applied to the {balance} balance; guest owes {owed}"),
                )
            }
        } else {
            let refund = deposit + (-balance);
            let note = if balance.is_negative() {
                format!(
                    "Paid in full with {} overpaid; refund deposit {deposit} plus overpayment for {refund}",
                    -balance
                )
            } else {
                format!("Paid in full; refund deposit {deposit}")
            };
            (SettlementBranch::PaidInFull, refund, Money::ZERO, note)
        };

        Self {
            total_amount,
            total_paid,
            deposit_held: deposit,
            balance,
            to_refund,
            balance_owed: owed,
            final_balance_after_deposit: owed.clamp_to_zero(),
            branch,
            note,
        }
    }
}

#[cfg(test)]
mod proptests;

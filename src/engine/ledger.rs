//! Money movement between players, the bank and the free-parking pool.
//!
//! All balance changes go through these functions so that:
//! - Income of a debtor pays down their debt before it is retained
//! - Every bank movement is recorded in the `MoneyLedger`
//!
//! A payment to the bank or pool is taken in full and may push the payer's
//! cash negative; that negative balance is the payer's obligation to the
//! bank. A payment to another player takes what the payer has and records
//! the remainder as a `Debt`.

use tracing::debug;

use crate::core::{Debt, PlayerId, PublicState};

/// Who receives a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payee {
    Bank,
    FreeParking,
    Player(PlayerId),
}

/// Money created by the bank for `player` (salary, card income, mortgages).
pub(crate) fn receive_from_bank(state: &mut PublicState, player: PlayerId, amount: i64) {
    if amount <= 0 {
        return;
    }
    state.ledger.paid_by_bank += amount;
    deposit(state, player, amount);
}

/// Add money to a balance, paying down any debt first.
///
/// Intercepted money is forwarded to the creditor, whose own debt is in turn
/// paid down before they keep anything.
pub(crate) fn deposit(state: &mut PublicState, player: PlayerId, amount: i64) {
    let mut recipient = player;
    let mut amount = amount;

    while amount > 0 {
        let Some(debt) = state.players[recipient].debt else {
            state.players[recipient].cash += amount;
            return;
        };

        let intercepted = amount.min(debt.amount);
        let remaining = debt.amount - intercepted;
        let kept = amount - intercepted;
        {
            let account = &mut state.players[recipient];
            account.debt = (remaining > 0).then_some(Debt { amount: remaining, ..debt });
            account.cash += kept;
        }

        if remaining == 0 {
            let message = format!(
                "{} settled their debt to {}",
                state.name(recipient),
                state.name(debt.creditor)
            );
            state.log(message);
        }
        debug!(debtor = %recipient, creditor = %debt.creditor, intercepted, "debt payment");

        recipient = debt.creditor;
        amount = intercepted;
    }
}

/// Charge `payer` an obligation owed to `payee`.
pub(crate) fn pay(state: &mut PublicState, payer: PlayerId, payee: Payee, amount: i64) {
    if amount <= 0 {
        return;
    }

    match payee {
        Payee::Bank => {
            state.players[payer].cash -= amount;
            state.ledger.paid_to_bank += amount;
        }
        Payee::FreeParking => {
            state.players[payer].cash -= amount;
            state.free_parking += amount;
        }
        Payee::Player(creditor) => {
            let account = &mut state.players[payer];
            let mut paid = account.spendable().min(amount);
            account.cash -= paid;
            let shortfall = amount - paid;

            if shortfall > 0 {
                match account.debt {
                    None => {
                        account.debt = Some(Debt { amount: shortfall, creditor });
                    }
                    Some(mut debt) if debt.creditor == creditor => {
                        debt.amount += shortfall;
                        account.debt = Some(debt);
                    }
                    Some(_) => {
                        // Only one creditor can be tracked; the rest is fronted
                        // against the payer's balance.
                        account.cash -= shortfall;
                        paid += shortfall;
                    }
                }
                let message = format!(
                    "{} is ${} short paying {}",
                    state.name(payer),
                    shortfall,
                    state.name(creditor)
                );
                state.log(message);
            }

            deposit(state, creditor, paid);
        }
    }
}

/// Move money that `from` is known to have.
pub(crate) fn transfer(state: &mut PublicState, from: PlayerId, to: PlayerId, amount: i64) {
    if amount <= 0 {
        return;
    }
    state.players[from].cash -= amount;
    deposit(state, to, amount);
}

/// Route any cash held by a debtor to their creditor.
///
/// Runs after every applied command as a catch-all for money that reached a
/// debtor without passing through `deposit`.
pub(crate) fn settle_debts(state: &mut PublicState) {
    loop {
        let debtor = state
            .players
            .iter()
            .find(|(_, p)| p.debt.is_some() && p.cash > 0)
            .map(|(id, _)| id);
        let Some(debtor) = debtor else {
            return;
        };

        let account = &mut state.players[debtor];
        let Some(debt) = account.debt else {
            return;
        };
        let paid = account.cash.min(debt.amount);
        account.cash -= paid;
        let remaining = debt.amount - paid;
        account.debt = (remaining > 0).then_some(Debt { amount: remaining, ..debt });
        if remaining == 0 {
            let message = format!(
                "{} settled their debt to {}",
                state.name(debtor),
                state.name(debt.creditor)
            );
            state.log(message);
        }
        deposit(state, debt.creditor, paid);
    }
}

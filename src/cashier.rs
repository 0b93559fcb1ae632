use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CashierError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientFunds { requested: Decimal, available: Decimal },
}

/// Player funds and lifetime cashier movements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    balance: Decimal,
    deposited: Decimal,
    withdrawn: Decimal,
}

impl Wallet {
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn deposited(&self) -> Decimal {
        self.deposited
    }

    pub fn withdrawn(&self) -> Decimal {
        self.withdrawn
    }

    /// Add funds, returning the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, CashierError> {
        check_positive(amount)?;
        let (Some(balance), Some(deposited)) =
            (self.balance.checked_add(amount), self.deposited.checked_add(amount))
        else {
            return Err(CashierError::InvalidAmount(amount));
        };
        self.balance = balance;
        self.deposited = deposited;
        Ok(self.balance)
    }

    /// Take funds out, returning the new balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, CashierError> {
        check_positive(amount)?;
        if amount > self.balance {
            return Err(CashierError::InsufficientFunds { requested: amount, available: self.balance });
        }
        self.balance -= amount;
        self.withdrawn += amount;
        Ok(self.balance)
    }

    /// Everything the player has won or lost since the first deposit, including stakes still on
    /// the table.
    pub fn net_lifetime_pnl(&self) -> Decimal {
        self.balance + self.withdrawn - self.deposited
    }

    /// Move a stake from the balance onto the table.
    pub(crate) fn debit(&mut self, amount: Decimal) -> Result<(), CashierError> {
        if amount > self.balance {
            return Err(CashierError::InsufficientFunds { requested: amount, available: self.balance });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Pay winnings or refunds back into the balance. Saturates at `Decimal::MAX`.
    pub(crate) fn credit(&mut self, amount: Decimal) {
        self.balance = self.balance.saturating_add(amount);
    }
}

fn check_positive(amount: Decimal) -> Result<(), CashierError> {
    if amount <= Decimal::ZERO {
        return Err(CashierError::InvalidAmount(amount));
    }
    Ok(())
}

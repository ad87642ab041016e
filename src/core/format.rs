//! Human-readable rendering of amounts and breakdowns.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use super::types::{TariffBreakdown, VehicleAge};

/// Round to whole units and group thousands with spaces ("1 650 000").
pub fn format_amount(d: Decimal) -> String {
    let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for VehicleAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 {
            write!(f, "{} y", self.years)
        } else {
            write!(f, "{} y {} m", self.years, self.months)
        }
    }
}

impl fmt::Display for TariffBreakdown {
    /// Zero excise and VAT lines are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Price:          {}", format_amount(self.price_local))?;
        writeln!(f, "Duty:           {}", format_amount(self.duty))?;
        if !self.excise.is_zero() {
            writeln!(f, "Excise:         {}", format_amount(self.excise))?;
        }
        if !self.vat.is_zero() {
            writeln!(f, "VAT:            {}", format_amount(self.vat))?;
        }
        writeln!(f, "Recycling fee:  {}", format_amount(self.recycling_fee))?;
        writeln!(f, "Customs total:  {}", format_amount(self.customs_payments()))?;
        writeln!(f, "Flat fees:      {}", format_amount(self.flat_fees))?;
        write!(f, "Total:          {}", format_amount(self.total))
    }
}

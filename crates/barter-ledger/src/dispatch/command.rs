//! Typed commands parsed from positional string arguments.
//!
//! Argument positions in errors are 1-based.

use super::function::LedgerFunction;
use crate::domain::{Attributes, Invoice, LedgerError, TradeId, TradeRequest};

/// A fully validated ledger invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init,
    CreateInvoice(Invoice),
    SetOwner {
        key: String,
        owner: String,
    },
    OpenTrade {
        requester: String,
        want: Attributes,
        willing: Vec<Attributes>,
    },
    PerformTrade(TradeRequest),
    RemoveTrade(TradeId),
    CleanTrades,
    Read {
        key: String,
    },
    ListInvoices,
    ListTrades,
}

impl Command {
    /// Parse a function name and its arguments.
    pub fn parse<A: AsRef<str>>(function: &str, args: &[A]) -> Result<Self, LedgerError> {
        let function: LedgerFunction = function.parse()?;
        let args = Args::new(function, args);

        match function {
            LedgerFunction::Init => {
                args.expect_count(0)?;
                Ok(Self::Init)
            }
            LedgerFunction::CreateInvoice => {
                args.expect_count(11)?;
                Ok(Self::CreateInvoice(Invoice {
                    vendor_id: args.text(1)?,
                    customer_id: args.text(2)?,
                    invoice_number: args.text(3)?,
                    invoice_amount: args.float(4)?,
                    currency: args.text(5)?,
                    material: args.text(6)?,
                    quantity: args.integer(7)?,
                    owner: args.text(8)?,
                    payment_date: args.text(9)?,
                    status: args.text(10)?,
                    new_payment_date: args.text(11)?,
                }))
            }
            LedgerFunction::SetOwner => {
                args.expect_count(2)?;
                Ok(Self::SetOwner {
                    key: args.text(1)?,
                    owner: args.text(2)?,
                })
            }
            LedgerFunction::OpenTrade => {
                let count = args.len();
                if count < 5 || count % 2 == 0 {
                    return Err(args.count_error("an odd number, at least 5"));
                }
                let requester = args.text(1)?;
                let want = args.attributes(2)?;
                let willing = (4..=count)
                    .step_by(2)
                    .map(|position| args.attributes(position))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::OpenTrade {
                    requester,
                    want,
                    willing,
                })
            }
            LedgerFunction::PerformTrade => {
                args.expect_count(6)?;
                Ok(Self::PerformTrade(TradeRequest {
                    trade_id: args.trade_id(1)?,
                    closer: args.text(2)?,
                    closer_invoice: args.text(3)?,
                    opener: Some(args.text(4)?),
                    opener_want: args.attributes(5)?,
                }))
            }
            LedgerFunction::RemoveTrade => {
                args.expect_count(1)?;
                Ok(Self::RemoveTrade(args.trade_id(1)?))
            }
            LedgerFunction::CleanTrades => {
                args.expect_count(0)?;
                Ok(Self::CleanTrades)
            }
            LedgerFunction::Read => {
                args.expect_count(1)?;
                Ok(Self::Read { key: args.text(1)? })
            }
            LedgerFunction::ListInvoices => {
                args.expect_count(0)?;
                Ok(Self::ListInvoices)
            }
            LedgerFunction::ListTrades => {
                args.expect_count(0)?;
                Ok(Self::ListTrades)
            }
        }
    }

    pub fn function(&self) -> LedgerFunction {
        match self {
            Self::Init => LedgerFunction::Init,
            Self::CreateInvoice(_) => LedgerFunction::CreateInvoice,
            Self::SetOwner { .. } => LedgerFunction::SetOwner,
            Self::OpenTrade { .. } => LedgerFunction::OpenTrade,
            Self::PerformTrade(_) => LedgerFunction::PerformTrade,
            Self::RemoveTrade(_) => LedgerFunction::RemoveTrade,
            Self::CleanTrades => LedgerFunction::CleanTrades,
            Self::Read { .. } => LedgerFunction::Read,
            Self::ListInvoices => LedgerFunction::ListInvoices,
            Self::ListTrades => LedgerFunction::ListTrades,
        }
    }
}

/// Positional argument accessor.
struct Args<'a, A> {
    function: LedgerFunction,
    values: &'a [A],
}

impl<'a, A: AsRef<str>> Args<'a, A> {
    fn new(function: LedgerFunction, values: &'a [A]) -> Self {
        Self { function, values }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn count_error(&self, expected: impl Into<String>) -> LedgerError {
        LedgerError::ArgumentCount {
            function: self.function.name().to_string(),
            expected: expected.into(),
            actual: self.values.len(),
        }
    }

    fn expect_count(&self, expected: usize) -> Result<(), LedgerError> {
        if self.values.len() != expected {
            return Err(self.count_error(expected.to_string()));
        }
        Ok(())
    }

    /// Raw argument at a 1-based position, rejected if blank.
    fn raw(&self, position: usize) -> Result<&'a str, LedgerError> {
        let value = self
            .values
            .get(position - 1)
            .map(AsRef::as_ref)
            .ok_or_else(|| LedgerError::invalid_argument(position, "is missing"))?;
        if value.trim().is_empty() {
            return Err(LedgerError::invalid_argument(
                position,
                "must be a non-empty string",
            ));
        }
        Ok(value)
    }

    fn text(&self, position: usize) -> Result<String, LedgerError> {
        self.raw(position).map(str::to_string)
    }

    fn integer(&self, position: usize) -> Result<i64, LedgerError> {
        let raw = self.raw(position)?;
        raw.trim().parse().map_err(|_| {
            LedgerError::invalid_argument(position, format!("must be an integer, got {raw:?}"))
        })
    }

    fn float(&self, position: usize) -> Result<f64, LedgerError> {
        let raw = self.raw(position)?;
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(LedgerError::invalid_argument(
                position,
                format!("must be a finite number, got {raw:?}"),
            )),
        }
    }

    fn trade_id(&self, position: usize) -> Result<TradeId, LedgerError> {
        let raw = self.raw(position)?;
        raw.parse().map_err(|_| {
            LedgerError::invalid_argument(position, format!("must be a trade id, got {raw:?}"))
        })
    }

    /// A (material, quantity) pair starting at `position`.
    fn attributes(&self, position: usize) -> Result<Attributes, LedgerError> {
        Ok(Attributes::new(
            self.text(position)?,
            self.integer(position + 1)?,
        ))
    }
}

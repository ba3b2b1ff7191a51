use super::Services;
use crate::session::TerminalSession;
use async_trait::async_trait;
use std::sync::Arc;
use w3t_console::{CommandHandler, CommandResult, OperationExt};
use w3t_explorer::is_fiat;

const USAGE: &str = "Usage: crypto <command> [options]

Commands:
  price <symbol>                  Get current price of cryptocurrency
  convert <amount> <from> <to>    Convert between currencies

Examples:
  crypto price btc
  crypto convert 1 eth usd";

/// `crypto price <symbol>` and `crypto convert <amount> <from> <to>`
pub struct Crypto {
    services: Arc<Services>,
}

impl Crypto {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl CommandHandler<TerminalSession> for Crypto {
    async fn call(&self, _session: &mut TerminalSession, args: &[String]) -> CommandResult {
        let market = &self.services.market;
        match args {
            [command, symbol] if command == "price" => {
                let price = market.spot(symbol).await.operation("fetching price")?;
                Ok(format!(
                    "{}: {} {}",
                    symbol.to_uppercase(),
                    format_amount(price, true),
                    market.vs_currency().to_uppercase()
                ))
            }
            [command, amount, from, to] if command == "convert" => {
                let Ok(value) = amount.parse::<f64>() else {
                    return Ok(format!("Invalid amount: {amount}"));
                };
                if !value.is_finite() || value < 0.0 {
                    return Ok(format!("Invalid amount: {amount}"));
                }
                let converted = market
                    .convert(value, from, to)
                    .await
                    .operation("converting currency")?;
                Ok(format!(
                    "{amount} {} = {} {}",
                    from.to_uppercase(),
                    format_amount(converted, is_fiat(to)),
                    to.to_uppercase()
                ))
            }
            _ => Ok(USAGE.to_string()),
        }
    }
}

/// Fiat amounts get cents; coin amounts up to eight significant decimals.
fn format_amount(value: f64, fiat: bool) -> String {
    if fiat {
        return format!("{value:.2}");
    }
    let fixed = format!("{value:.8}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_trimmed() {
        assert_eq!(format_amount(3000.0, true), "3000.00");
        assert_eq!(format_amount(0.1, false), "0.1");
        assert_eq!(format_amount(2.0, false), "2");
        assert_eq!(format_amount(0.000000001, false), "0");
    }
}

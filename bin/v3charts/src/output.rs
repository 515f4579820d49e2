use eyre::Result;
use v3charts_types::{BalanceValues, ChartData, PoolSnapshot, UsdSeries};

fn cell(value: f64) -> String {
    if value == 0.0 || (1e-4..1e12).contains(&value.abs()) {
        format!("{value:.6}")
    } else {
        format!("{value:.6e}")
    }
}

fn balance_line(symbol: &str, amount: Option<f64>, usd: Option<f64>) -> Option<String> {
    let amount = amount?;
    Some(match usd {
        Some(usd) => format!("{symbol} balance {} (${usd:.2})", cell(amount)),
        None => format!("{symbol} balance {}", cell(amount)),
    })
}

/// One row per entry, the active range is marked with `*`.
pub fn render_table(snapshot: &PoolSnapshot, data: &ChartData, usd: Option<&UsdSeries>, balances: Option<&BalanceValues>) -> String {
    let symbol0 = snapshot.token0.get_symbol();
    let symbol1 = snapshot.token1.get_symbol();
    let active_tick = data.active_range.map(|entry| entry.tick);

    let mut lines = Vec::with_capacity(data.entries.len() + 5);
    lines.push(format!("{symbol0}/{symbol1} fee {} spacing {} current tick {}", snapshot.fee, snapshot.tick_spacing, snapshot.current_tick));
    if let Some(percentage) = data.active_range_percentage {
        lines.push(format!("current price at {:.2}% of the active range", percentage * 100.0));
    }
    if let Some(balances) = balances {
        lines.extend(balance_line(&symbol0, balances.token0, balances.token0_usd));
        lines.extend(balance_line(&symbol1, balances.token1, balances.token1_usd));
    }

    let mut header = format!(
        "  {:>8} {:>16} {:>16} {:>26} {:>20} {:>20}",
        "tick",
        format!("{symbol1}/{symbol0}"),
        format!("{symbol0}/{symbol1}"),
        "liquidity",
        symbol0,
        symbol1
    );
    if usd.is_some() {
        header.push_str(&format!(" {:>16} {:>16}", format!("{symbol0} usd"), format!("{symbol1} usd")));
    }
    lines.push(header);

    for (i, entry) in data.entries.iter().enumerate() {
        let marker = if Some(entry.tick) == active_tick { '*' } else { ' ' };
        let mut line = format!(
            "{marker} {:>8} {:>16} {:>16} {:>26} {:>20} {:>20}",
            entry.tick,
            cell(entry.price0),
            cell(entry.price1),
            format!("{:.0}", entry.liquidity),
            cell(entry.amount0_locked),
            cell(entry.amount1_locked)
        );
        if let Some(usd) = usd {
            let usd0 = usd.token0.get(i).map(|value| format!("{value:.2}")).unwrap_or_default();
            let usd1 = usd.token1.get(i).map(|value| format!("{value:.2}")).unwrap_or_default();
            line.push_str(&format!(" {usd0:>16} {usd1:>16}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

pub fn render_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

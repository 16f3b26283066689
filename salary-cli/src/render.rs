//! Plain-text screens for the terminal front end.

use std::fmt::Write;

use rust_decimal::Decimal;
use salary_core::{
    CalculationRequest, CalculationResult, DisplayMode, mode_switch_available, select_mode,
};

use crate::state::ContractCard;
use crate::utils::{format_amount, format_pln};

/// Caption suffix shown next to "Estimated Net".
fn mode_caption(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::RealCash => " (On Hand)",
        DisplayMode::InvoiceNet => " (Transfer)",
        DisplayMode::IgnoringCosts => " (No Costs)",
    }
}

pub fn selection_screen() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Select Your Contract Type");
    let _ = writeln!(out, "Choose the option that best fits your current situation.");
    let _ = writeln!(out);
    for (i, card) in ContractCard::ALL.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<16} {}", i + 1, card.title(), card.subtitle());
    }
    out
}

/// Maps a menu answer ("1".."4") to a card.
pub fn card_for_choice(choice: &str) -> Option<ContractCard> {
    let index: usize = choice.trim().parse().ok()?;
    index
        .checked_sub(1)
        .and_then(|i| ContractCard::ALL.get(i))
        .copied()
}

/// The mode toggle line, e.g. `[Real Cash]  Invoice Net   Ignoring Costs`.
pub fn mode_toggle(active: DisplayMode) -> String {
    DisplayMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label())
            } else {
                format!(" {} ", mode.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The result screen for one display mode.
///
/// The mode toggle and caption appear only when the modes differ.
pub fn result_screen(
    request: &CalculationRequest,
    result: &CalculationResult,
) -> String {
    let switchable = mode_switch_available(request);
    let mut out = String::new();

    if switchable {
        let _ = writeln!(out, "{}", mode_toggle(result.display_mode));
        let _ = writeln!(out);
    }
    let caption = if switchable {
        mode_caption(result.display_mode)
    } else {
        ""
    };
    let _ = writeln!(out, "ESTIMATED NET{}", caption.to_uppercase());
    let _ = writeln!(out, "  {}", format_pln(result.net_amount));
    let _ = writeln!(out);
    let _ = writeln!(out, "Gross Income   {}", format_pln(result.gross_amount));
    let _ = writeln!(out, "Taxes & ZUS    ~{}", format_pln(result.deductions_total));

    if let Some(breakdown) = &result.breakdown {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  ZUS contribution  {}",
            format_amount(breakdown.fixed_contribution)
        );
        let _ = writeln!(out, "  Taxable base      {}", format_amount(breakdown.taxable_base));
        let _ = writeln!(out, "  Income tax        {}", format_amount(breakdown.income_tax));
        if request.effective_costs() > Decimal::ZERO {
            let _ = writeln!(
                out,
                "  Business costs    {}",
                format_amount(request.business_costs)
            );
        }
    }
    out
}

/// One line per display mode, used by the one-shot and batch commands.
pub fn summary_line(
    request: &CalculationRequest,
    results: &[CalculationResult],
) -> String {
    let mut line = format!(
        "{:<4} gross {:>12}",
        request.contract_type.as_str(),
        format_pln(request.gross_amount)
    );
    if mode_switch_available(request) {
        for mode in DisplayMode::ALL {
            if let Some(result) = select_mode(results, mode) {
                let _ = write!(line, "  {} {}", mode.as_str(), format_pln(result.net_amount));
            }
        }
    } else if let Some(result) = results.first() {
        let _ = write!(
            line,
            "  net {}  taxes ~{}",
            format_pln(result.net_amount),
            format_pln(result.deductions_total)
        );
    }
    line
}

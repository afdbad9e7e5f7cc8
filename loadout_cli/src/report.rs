//! Plain-text rendering of result records

use loadout_core::calc::{DeterministicResult, SimulationResult};
use loadout_core::SkillPercents;
use std::fmt::Write as _;

fn percents(p: &SkillPercents) -> String {
    format!("{:.1}% great / {:.1}% good / {:.1}% fail", p.great, p.good, p.fail)
}

/// Render both records side by side
pub fn render(det: &DeterministicResult, sim: Option<&SimulationResult>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Repair");
    let _ = writeln!(out, "  solo:  {:.1}s", det.repair.solo_time_seconds);
    let _ = writeln!(out, "  team:  {:.1}s (x{:.2})", det.repair.team_time_seconds, det.repair.teammate_multiplier);
    let _ = writeln!(
        out,
        "  speed: x{:.3}, hyperfocus x{:.3}",
        det.repair.speed_multiplier, det.repair.hyperfocus_speed_factor
    );

    let _ = writeln!(out, "Healing");
    let _ = writeln!(out, "  self:  {:.1}s", det.healing.self_time_seconds);
    let _ = writeln!(out, "  other: {:.1}s", det.healing.other_time_seconds);

    let _ = writeln!(out, "Item");
    let _ = writeln!(
        out,
        "  charges: {:.1} / {:.1} ({:.2}/s over {:.1}s)",
        det.item.charges_used, det.item.total_charges, det.item.charge_rate, det.item.use_seconds
    );

    let _ = writeln!(out, "Skill checks");
    let _ = writeln!(out, "  expected hyperfocus stacks: {:.2}", det.skill.expected_hyperfocus_stacks);
    let _ = writeln!(out, "  with ping: {}", percents(&det.skill.effective_percents));
    if let Some(stake_out) = &det.skill.stake_out_percents {
        let _ = writeln!(out, "  with stake out: {}", percents(stake_out));
    }

    if let Some(sim) = sim {
        let stats = &sim.repair_time_seconds;
        let _ = writeln!(out, "Simulation ({} trials)", sim.trials);
        let _ = writeln!(out, "  repair avg {:.1}s, p50 {:.1}s, p90 {:.1}s", stats.avg, stats.p50, stats.p90);
        let _ = writeln!(out, "  final stacks avg {:.2}", sim.expected_stacks_avg);
        if det.repair.solo_time_seconds > 0.0 {
            let gap = (stats.avg - det.repair.solo_time_seconds) / det.repair.solo_time_seconds * 100.0;
            let _ = writeln!(out, "  vs closed form: {:+.1}%", gap);
        }
        if sim.capped_trials > 0 {
            let _ = writeln!(out, "  {} trials hit the check limit", sim.capped_trials);
        }
    }

    out
}

//! Plain-text tables for terminal display.
//!
//! Pure functions returning `String`s so commands and tests can share them.
//! Column widths grow with the longest name in the table.
//!
//! ## Example
//!
//! ```rust
//! use crease_engine::model::Match;
//! use crease_cli::formatters::format_match_line;
//!
//! let m = Match::league(1, 3, "ana", "ben");
//! assert_eq!(format_match_line(&m), "#3   League       ana v ben");
//! ```

use crease_engine::forecast::QualificationChance;
use crease_engine::model::{Match, Tournament};
use crease_engine::standings::{TeamStanding, TopBatsman, TopBowler};

fn name_width<'a>(names: impl Iterator<Item = &'a str>, header: &str) -> usize {
    names.map(str::len).chain([header.len()]).max().unwrap_or(0)
}

/// One fixture: sequence, stage, participants and result when known.
pub fn format_match_line(m: &Match) -> String {
    let mut line = format!(
        "#{:<3} {:<12} {} v {}",
        m.sequence,
        m.kind.as_str(),
        m.players[0],
        m.players[1]
    );
    if let Some(desc) = m.description.as_deref().filter(|_| m.is_resolved()) {
        line.push_str(" - ");
        line.push_str(desc);
    }
    line
}

pub fn format_schedule(matches: &[Match]) -> String {
    matches
        .iter()
        .map(|m| format_match_line(m) + "\n")
        .collect()
}

/// Short header for a tournament: id, name, status, creation date.
pub fn format_tournament_header(t: &Tournament) -> String {
    let mut s = format!("Tournament {} \"{}\" [{}]", t.id, t.name, t.status);
    if let Some(created) = t.created_on {
        s.push_str(&format!(" created {}", created.format("%Y-%m-%d %H:%M UTC")));
    }
    s
}

pub fn format_standings(standings: &[TeamStanding]) -> String {
    let w = name_width(standings.iter().map(|s| s.team.as_str()), "Team");
    let mut out = format!(
        "{:>2}  {:<w$}  {:>2} {:>2} {:>2} {:>3} {:>8}  Q\n",
        "#", "Team", "P", "W", "L", "Pts", "NRR"
    );
    for s in standings {
        out.push_str(&format!(
            "{:>2}  {:<w$}  {:>2} {:>2} {:>2} {:>3} {:>8}  {}\n",
            s.rank,
            s.team,
            s.played,
            s.won,
            s.lost,
            s.points,
            s.nrr_display(),
            if s.is_qualified { "Q" } else { "" }
        ));
    }
    out
}

pub fn format_batsmen(batsmen: &[TopBatsman]) -> String {
    let w = name_width(batsmen.iter().map(|b| b.name.as_str()), "Batsman");
    let mut out = format!(
        "{:>2}  {:<w$}  {:>4} {:>2} {:>6} {:>6}\n",
        "#", "Batsman", "Runs", "M", "Avg", "SR"
    );
    for b in batsmen {
        out.push_str(&format!(
            "{:>2}  {:<w$}  {:>4} {:>2} {:>6.1} {:>6.1}\n",
            b.rank, b.name, b.runs, b.matches, b.average, b.strike_rate
        ));
    }
    out
}

pub fn format_bowlers(bowlers: &[TopBowler]) -> String {
    let w = name_width(bowlers.iter().map(|b| b.name.as_str()), "Bowler");
    let mut out = format!(
        "{:>2}  {:<w$}  {:>4} {:>2} {:>6} {:>6}\n",
        "#", "Bowler", "Wkts", "M", "Econ", "Avg"
    );
    for b in bowlers {
        out.push_str(&format!(
            "{:>2}  {:<w$}  {:>4} {:>2} {:>6.1} {:>6.1}\n",
            b.rank, b.name, b.wickets, b.matches, b.economy, b.average
        ));
    }
    out
}

/// Chance table. Without a playoff bracket nobody is marked eliminated.
pub fn format_chances(chances: &[QualificationChance], has_playoffs: bool) -> String {
    let w = name_width(chances.iter().map(|c| c.team.as_str()), "Team");
    let mut out = format!(
        "{:<w$}  {:>5} {:>5}  {:<14} Note\n",
        "Team", "Top2", "Top4", "Status"
    );
    for c in chances {
        let note = if c.is_qualified {
            "qualified"
        } else if has_playoffs && !c.can_qualify {
            "eliminated"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:<w$}  {:>4}% {:>4}%  {:<14} {}\n",
            c.team,
            c.top2_chance,
            c.top4_chance,
            c.status.label(),
            note
        ));
    }
    out
}

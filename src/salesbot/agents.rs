//! Human-agent roster for handoff from the bot.

use rand::seq::IndexedRandom;
use serde::Deserialize;

/// A human sales agent a visitor can be handed off to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Agent {
    pub name: String,
    pub phone: String,
    pub whatsapp: String,
}

/// Built-in roster used when the config file does not supply one.
pub fn default_roster() -> Vec<Agent> {
    vec![
        Agent {
            name: "Cauê".to_string(),
            phone: "+55 81 98903-6646".to_string(),
            whatsapp: "https://wa.me/5581989036646".to_string(),
        },
        Agent {
            name: "Lucas".to_string(),
            phone: "+55 11 99999-9999".to_string(),
            whatsapp: "https://wa.me/5511999999999".to_string(),
        },
    ]
}

/// Pick one agent uniformly at random.
pub fn pick(roster: &[Agent]) -> Option<&Agent> {
    roster.choose(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_has_two_agents() {
        let roster = default_roster();
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|a| a.whatsapp.starts_with("https://wa.me/")));
    }

    #[test]
    fn test_pick_returns_roster_member() {
        let roster = default_roster();
        for _ in 0..20 {
            let agent = pick(&roster).expect("non-empty roster");
            assert!(roster.contains(agent));
        }
    }

    #[test]
    fn test_pick_empty_roster() {
        assert!(pick(&[]).is_none());
    }

    #[test]
    fn test_pick_eventually_selects_every_agent() {
        let roster = default_roster();
        let mut seen = [false, false];
        for _ in 0..200 {
            let agent = pick(&roster).unwrap();
            let idx = roster.iter().position(|a| a == agent).unwrap();
            seen[idx] = true;
        }
        assert!(seen[0] && seen[1], "uniform pick should hit both agents");
    }
}

//! Dashboard rendering: uptime, counters, and ten-segment usage meters.

use chrono::Duration;

use crate::salesbot::database::Counters;

const METER_SEGMENTS: u64 = 10;

/// Format an uptime as "{h}h {mm}m".
pub fn uptime_label(uptime: Duration) -> String {
    let hours = uptime.num_hours().max(0);
    let minutes = (uptime.num_minutes().max(0)) % 60;
    format!("{hours}h {minutes:02}m")
}

/// Render a ten-segment meter for `value` out of `total`, annotated with
/// the raw value and its integer percentage. A zero total renders an
/// empty meter instead of dividing.
pub fn meter(value: u64, total: u64) -> String {
    if total == 0 {
        return format!("{} 0 (0%)", "▱".repeat(METER_SEGMENTS as usize));
    }

    let percent = value * 100 / total;
    let filled = (value * METER_SEGMENTS / total) as usize;
    let empty = METER_SEGMENTS as usize - filled;

    format!("{}{} {} ({}%)", "▰".repeat(filled), "▱".repeat(empty), value, percent)
}

/// Render the full admin dashboard text.
pub fn render(counters: &Counters, registered_users: usize, uptime: Duration) -> String {
    let total = counters.total();

    format!(
        "\
🎯 *FIRSTSELLER DASHBOARD*

⏰ *Ativo:* `{}`
📊 *Total:* `{}`
👤 *Cadastrados:* `{}`

👥 Usuários: {}
📋 Forms: {}
📞 Contatos: {}

🟢 *ONLINE* | 🔄 *Tempo real*",
        uptime_label(uptime),
        total,
        registered_users,
        meter(counters.users_served, total),
        meter(counters.forms_sent, total),
        meter(counters.contacts_requested, total),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_count(meter: &str) -> usize {
        meter.chars().filter(|c| *c == '▰' || *c == '▱').count()
    }

    fn percent_of(meter: &str) -> u64 {
        let open = meter.rfind('(').unwrap();
        let close = meter.rfind("%)").unwrap();
        meter[open + 1..close].parse().unwrap()
    }

    #[test]
    fn test_zero_total_renders_empty_meter() {
        assert_eq!(meter(0, 0), "▱▱▱▱▱▱▱▱▱▱ 0 (0%)");
    }

    #[test]
    fn test_meter_is_always_ten_segments() {
        for (value, total) in [(0, 0), (1, 3), (5, 5), (7, 9), (1, 100)] {
            assert_eq!(segment_count(&meter(value, total)), 10, "value={value} total={total}");
        }
    }

    #[test]
    fn test_meter_linear_mapping() {
        assert_eq!(meter(5, 10), "▰▰▰▰▰▱▱▱▱▱ 5 (50%)");
        assert_eq!(meter(10, 10), "▰▰▰▰▰▰▰▰▰▰ 10 (100%)");
        assert_eq!(meter(1, 3), "▰▰▰▱▱▱▱▱▱▱ 1 (33%)");
    }

    #[test]
    fn test_percentages_sum_at_most_one_hundred() {
        let counters = Counters { users_served: 1, forms_sent: 1, contacts_requested: 1 };
        let total = counters.total();
        let sum = percent_of(&meter(counters.users_served, total))
            + percent_of(&meter(counters.forms_sent, total))
            + percent_of(&meter(counters.contacts_requested, total));
        assert!(sum <= 100, "percentages summed to {sum}");
    }

    #[test]
    fn test_uptime_label_format() {
        assert_eq!(uptime_label(Duration::minutes(0)), "0h 00m");
        assert_eq!(uptime_label(Duration::minutes(62)), "1h 02m");
        assert_eq!(uptime_label(Duration::hours(25) + Duration::minutes(5)), "25h 05m");
    }

    #[test]
    fn test_render_zero_state() {
        let text = render(&Counters::default(), 0, Duration::minutes(3));
        assert!(text.contains("FIRSTSELLER DASHBOARD"));
        assert!(text.contains("`0`"));
        assert!(text.contains("▱▱▱▱▱▱▱▱▱▱ 0 (0%)"));
    }

    #[test]
    fn test_render_includes_all_meters() {
        let counters = Counters { users_served: 4, forms_sent: 3, contacts_requested: 1 };
        let text = render(&counters, 12, Duration::hours(2));
        assert!(text.contains("👥 Usuários:"));
        assert!(text.contains("📋 Forms:"));
        assert!(text.contains("📞 Contatos:"));
        assert!(text.contains("`8`"));
        assert!(text.contains("`12`"));
        assert!(text.contains("2h 00m"));
    }
}

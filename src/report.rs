//! Top-N ranking over a table's live entries.

use crate::key_ops::KeyOps;
use crate::table::Table;
use core::fmt::Display;

/// Entries ranked by value, highest first; equal values in ascending key
/// order. At most `n` entries.
pub fn top_n<K, V, O>(table: &Table<K, V, O>, n: usize) -> Vec<(&K, &V)>
where
    K: Ord,
    V: Ord,
    O: KeyOps<K>,
{
    let mut ranked: Vec<(&K, &V)> = table.iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}

/// How a key is printed in a report line.
pub trait ReportKey {
    fn label(&self) -> String;
}

/// Bytes print through `escape_ascii`, except space, which prints as `\x20`
/// so it stays visible in a report line.
impl ReportKey for u8 {
    fn label(&self) -> String {
        if *self == b' ' {
            return "\\x20".to_string();
        }
        self.escape_ascii().to_string()
    }
}

impl ReportKey for [u8] {
    fn label(&self) -> String {
        String::from_utf8_lossy(self).into_owned()
    }
}

impl ReportKey for str {
    fn label(&self) -> String {
        self.to_string()
    }
}

impl ReportKey for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl<T: ReportKey + ?Sized> ReportKey for &T {
    fn label(&self) -> String {
        (**self).label()
    }
}

/// `title:` followed by one `  key: value` line per entry.
pub fn render<K, V>(title: &str, entries: &[(&K, &V)]) -> String
where
    K: ReportKey + ?Sized,
    V: Display,
{
    let mut out = format!("{}:\n", title);
    for (key, value) in entries {
        out.push_str(&format!("  {}: {}\n", key.label(), value));
    }
    out
}

//! Canonical metric-key formatting.
//!
//! Zabbix item keys are dot-delimited, so the structural characters of
//! an mbean identifier (`java.lang:type=GarbageCollector,name=G1 Young
//! Generation`) have to be flattened before the key is assembled.

/// Characters with structural meaning in mbean identifiers or the
/// sink's key grammar.
const RESERVED: [char; 5] = ['.', ',', '=', '/', '\\'];

/// Replaces every reserved character in an mbean identifier with `_`,
/// preserving all other characters and the overall length.
pub fn sanitize_mbean(mbean: &str) -> String {
    mbean
        .chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

/// Canonical flat key for one attribute reading:
/// `<target>.<sanitized mbean>.<attribute>.<path>`.
///
/// Always four segments; an empty path leaves a trailing empty
/// segment. Pure and total.
///
/// # Examples
///
/// ```
/// use jolzab_common::metric_key::metric_key;
///
/// let key = metric_key("db", "java.lang:type=Memory", "HeapMemoryUsage", "used");
/// assert_eq!(key, "db.java_lang:type_Memory.HeapMemoryUsage.used");
/// ```
pub fn metric_key(target: &str, mbean: &str, attribute: &str, path: &str) -> String {
    format!("{target}.{}.{attribute}.{path}", sanitize_mbean(mbean))
}

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of every generated canvas id.
pub const ID_PREFIX: &str = "jviz-canvas-";
/// Length of the generated suffix after [`ID_PREFIX`].
pub const ID_LENGTH: usize = 5;

/// Produces element ids that are unique across co-existing canvases.
pub trait IdGenerator {
    fn generate_id(&mut self, prefix: &str, length: usize) -> String;
}

/// Process-wide counter rendered as a zero-padded base-36 suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterIds;

impl IdGenerator for CounterIds {
    fn generate_id(&mut self, prefix: &str, length: usize) -> String {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}{}", base36(n, length))
    }
}

fn base36(mut n: u64, width: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::with_capacity(width.max(1));
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    while out.len() < width {
        out.push(b'0');
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Base id shared by every layer of the canvas `component_id`.
pub fn canvas_base_id(component_id: &str) -> String {
    format!("{component_id}-canvas")
}

/// Id of the layer at `index` under `base`.
pub fn layer_id(base: &str, index: usize) -> String {
    format!("{base}-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let mut ids = CounterIds;
        let a = ids.generate_id(ID_PREFIX, ID_LENGTH);
        let b = ids.generate_id(ID_PREFIX, ID_LENGTH);
        assert_ne!(a, b);
        assert!(a.starts_with(ID_PREFIX));
        assert_eq!(a.len(), ID_PREFIX.len() + ID_LENGTH);
    }

    #[test]
    fn base36_pads_to_width() {
        assert_eq!(base36(0, 5), "00000");
        assert_eq!(base36(35, 3), "00z");
        assert_eq!(base36(36, 1), "10");
    }

    #[test]
    fn layer_ids_derive_from_base() {
        let base = canvas_base_id("jviz-canvas-abcde");
        assert_eq!(base, "jviz-canvas-abcde-canvas");
        assert_eq!(layer_id(&base, 2), "jviz-canvas-abcde-canvas-2");
    }
}

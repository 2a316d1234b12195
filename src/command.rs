use crate::sweep::Hibernator;

pub const USAGE: &str = "Usage: /hibernate reload";

/// Handle the one command the sweep exposes. `args` are the tokens after
/// the command name; the returned string is the reply to whoever sent it.
/// Runs on the same logical thread as the sweep, so a reload can never race
/// one.
pub fn dispatch(args: &[&str], hibernator: &mut Hibernator) -> String {
    match args {
        [sub] if sub.eq_ignore_ascii_case("reload") => match hibernator.reload() {
            Ok(()) => "Configuration reloaded.".to_owned(),
            Err(e) => {
                log::error!("settings reload failed: {e}");
                "Reload failed, keeping previous settings (see server log).".to_owned()
            }
        },
        _ => USAGE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::io::Write as _;

    fn write_settings(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("hibernate.properties");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(text.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reload_rereads_the_file_and_confirms() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "chunk-range=3\n");
        let mut h = Hibernator::new(&path);
        assert_eq!(h.settings().chunk_range, 3);

        std::fs::write(&path, "chunk-range=9\nremove-items=false\n").unwrap();
        assert_eq!(dispatch(&["reload"], &mut h), "Configuration reloaded.");
        assert_eq!(h.settings().chunk_range, 9);
        assert!(!h.settings().remove_items);
        // untouched keys snap back to their defaults: the reload replaces
        // the whole value, it does not patch fields
        assert!(h.settings().unload_chunks);
    }

    #[test]
    fn reload_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "chunk-range=3\n");
        let mut h = Hibernator::new(&path);
        assert_eq!(dispatch(&["RELOAD"], &mut h), "Configuration reloaded.");
    }

    #[test]
    fn failed_reload_keeps_the_previous_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "chunk-range=3\n");
        let mut h = Hibernator::new(&path);

        std::fs::write(&path, "chunk-range=broken\n").unwrap();
        let reply = dispatch(&["reload"], &mut h);
        assert!(reply.contains("keeping previous settings"), "{reply}");
        assert_eq!(h.settings(), &Settings { chunk_range: 3, ..Settings::default() });
    }

    #[test]
    fn anything_else_gets_the_usage_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "");
        let mut h = Hibernator::new(&path);
        assert_eq!(dispatch(&[], &mut h), USAGE);
        assert_eq!(dispatch(&["status"], &mut h), USAGE);
        assert_eq!(dispatch(&["reload", "now"], &mut h), USAGE);
    }
}

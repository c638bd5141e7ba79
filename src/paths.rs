use anyhow::Result;
use std::{env, path::PathBuf};

#[derive(Clone)]
pub struct Paths {
    pub mirrors: PathBuf,
    pub config: PathBuf,
}

pub fn gitmir_home() -> Result<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME");
    let base = xdg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env::var_os("HOME").unwrap_or_default()).join(".config"));
    Ok(base.join("gitmir"))
}

pub fn paths() -> Result<Paths> {
    let home = gitmir_home()?;
    Ok(Paths {
        mirrors: home.join("mirrors"),
        config: home.join("config.toml"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn home_honors_xdg_config_home() {
        let td = tempfile::tempdir().unwrap();
        unsafe { env::set_var("XDG_CONFIG_HOME", td.path()) };
        let home = gitmir_home().unwrap();
        unsafe { env::remove_var("XDG_CONFIG_HOME") };
        assert_eq!(home, td.path().join("gitmir"));
    }

    #[test]
    #[serial]
    fn paths_hang_off_home() {
        let td = tempfile::tempdir().unwrap();
        unsafe { env::set_var("XDG_CONFIG_HOME", td.path()) };
        let p = paths().unwrap();
        unsafe { env::remove_var("XDG_CONFIG_HOME") };
        let home = td.path().join("gitmir");
        assert_eq!(p.mirrors, home.join("mirrors"));
        assert_eq!(p.config, home.join("config.toml"));
    }
}

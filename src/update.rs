//! Version Checks and Self-Update
//!
//! Snippy is distributed through Homebrew. The installed and the latest
//! available versions are probed with `brew` and cached under `~/.snippy` so
//! that `--version` and the "new version available" hint never wait on the
//! package manager. Probes refresh the caches from a detached background
//! thread; the process may well exit before they finish.

use std::{
    fs,
    path::PathBuf,
    process::Command,
    thread::{self, JoinHandle},
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{Result, SnippyError},
    prompt::Prompter,
    utils::{print_error, print_info, print_success},
};

/// Name of the Homebrew formula.
pub const PACKAGE_NAME: &str = "snippy";

/// Shown when no version can be determined.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// The two cached versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Installed,
    Latest,
}

impl VersionKind {
    fn file_name(self) -> &'static str {
        match self {
            Self::Installed => "installed_version.json",
            Self::Latest => "latest_version.json",
        }
    }
}

/// A version together with the moment it was probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedVersion {
    pub version: String,
    pub checked_at: DateTime<Utc>,
}

impl CachedVersion {
    /// Whether the entry is younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.checked_at) < ttl
    }
}

/// On-disk cache of the probed versions.
#[derive(Debug, Clone)]
pub struct VersionCache {
    dir: PathBuf,
    ttl: Duration,
}

impl VersionCache {
    pub fn new(dir: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            dir: dir.into(),
            ttl,
        }
    }

    fn path(&self, kind: VersionKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Cached entry regardless of its age. Unreadable caches count as absent.
    #[must_use]
    pub fn read(&self, kind: VersionKind) -> Option<CachedVersion> {
        let content = fs::read_to_string(self.path(kind)).ok()?;

        serde_json::from_str(&content)
            .inspect_err(|e| log::debug!("Ignoring unreadable {kind:?} version cache: {e}"))
            .ok()
    }

    /// Cached version if it is still within the freshness window.
    #[must_use]
    pub fn fresh(&self, kind: VersionKind, now: DateTime<Utc>) -> Option<String> {
        self.read(kind)
            .filter(|cached| cached.is_fresh(now, self.ttl))
            .map(|cached| cached.version)
    }

    /// Stores `version` stamped with the current time.
    ///
    /// # Errors
    /// * If the cache directory or file cannot be written
    pub fn write(&self, kind: VersionKind, version: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = CachedVersion {
            version: version.to_string(),
            checked_at: Utc::now(),
        };
        let content = serde_json::to_string(&entry).map_err(std::io::Error::other)?;

        fs::write(self.path(kind), content)?;
        Ok(())
    }
}

/// Source of version information and upgrades.
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager {
    /// Installed version, `None` when unknown.
    fn installed_version(&self) -> Option<String>;

    /// Latest published version, `None` when unknown.
    fn latest_version(&self) -> Option<String>;

    /// Upgrades the package and returns the exit code.
    ///
    /// # Errors
    /// * If the package manager cannot be spawned
    fn upgrade(&self) -> Result<i32>;
}

/// [`PackageManager`] backed by the `brew` executable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Homebrew;

impl Homebrew {
    fn stdout(args: &[&str]) -> Option<String> {
        let output = Command::new("brew")
            .args(args)
            .output()
            .inspect_err(|e| log::debug!("brew {args:?} could not run: {e}"))
            .ok()?;

        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            log::debug!("brew {args:?} exited with {}", output.status);
            None
        }
    }
}

impl PackageManager for Homebrew {
    fn installed_version(&self) -> Option<String> {
        Self::stdout(&["list", "--versions", PACKAGE_NAME])
            .and_then(|output| parse_installed_version(&output))
    }

    fn latest_version(&self) -> Option<String> {
        Self::stdout(&["info", "--json=v2", PACKAGE_NAME])
            .and_then(|output| parse_latest_version(&output))
    }

    fn upgrade(&self) -> Result<i32> {
        let status = Command::new("brew")
            .args(["upgrade", PACKAGE_NAME])
            .status()
            .map_err(|_| SnippyError::CommandFailed {
                command: format!("brew upgrade {PACKAGE_NAME}"),
            })?;

        Ok(status.code().unwrap_or(1))
    }
}

/// Extracts the version from `brew list --versions` output (`snippy 0.2.1`).
#[must_use]
pub fn parse_installed_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .nth(1)
        .map(ToString::to_string)
}

/// Extracts the stable version from `brew info --json=v2` output.
#[must_use]
pub fn parse_latest_version(output: &str) -> Option<String> {
    let info: serde_json::Value = serde_json::from_str(output).ok()?;

    info["formulae"][0]["versions"]["stable"]
        .as_str()
        .map(ToString::to_string)
}

/// Refreshes stale cache entries on a detached thread. Failures are logged
/// and otherwise ignored.
pub fn refresh_in_background<M>(cache: VersionCache, manager: M) -> JoinHandle<()>
where
    M: PackageManager + Send + 'static,
{
    thread::spawn(move || refresh_stale(&cache, &manager, Utc::now()))
}

fn refresh_stale(cache: &VersionCache, manager: &impl PackageManager, now: DateTime<Utc>) {
    for kind in [VersionKind::Installed, VersionKind::Latest] {
        if cache.fresh(kind, now).is_some() {
            continue;
        }

        let probed = match kind {
            VersionKind::Installed => manager.installed_version(),
            VersionKind::Latest => manager.latest_version(),
        };

        match probed {
            Some(version) => {
                if let Err(e) = cache.write(kind, &version) {
                    log::debug!("Could not cache {kind:?} version: {e}");
                }
            }
            None => log::debug!("{kind:?} version unknown"),
        }
    }
}

/// Installed version for `--version`: cache first, then a live probe, then
/// [`UNKNOWN_VERSION`].
pub fn resolve_installed_version(cache: &VersionCache, manager: &impl PackageManager) -> String {
    if let Some(cached) = cache.read(VersionKind::Installed) {
        return cached.version;
    }

    match manager.installed_version() {
        Some(version) => {
            if let Err(e) = cache.write(VersionKind::Installed, &version) {
                log::debug!("Could not cache installed version: {e}");
            }
            version
        }
        None => UNKNOWN_VERSION.to_string(),
    }
}

/// Offers an upgrade when the cached versions disagree. Does nothing when
/// either one is unknown.
///
/// # Errors
/// * If the user cancels the prompt
pub fn notify_if_outdated(
    cache: &VersionCache,
    manager: &impl PackageManager,
    prompter: &mut impl Prompter,
) -> Result<bool> {
    let (Some(installed), Some(latest)) = (
        cache.read(VersionKind::Installed),
        cache.read(VersionKind::Latest),
    ) else {
        return Ok(false);
    };

    if installed.version == latest.version {
        return Ok(false);
    }

    offer_upgrade(&installed.version, &latest.version, manager, prompter)
}

/// `snippy update`: probes both versions live and offers an upgrade.
///
/// # Errors
/// * If the user cancels the prompt
pub fn run_update(
    cache: &VersionCache,
    manager: &impl PackageManager,
    prompter: &mut impl Prompter,
) -> Result<bool> {
    let (Some(installed), Some(latest)) = (manager.installed_version(), manager.latest_version())
    else {
        print_error(
            "Could not determine the snippy versions.",
            "Make sure Homebrew is installed and snippy was installed with it.",
        );
        return Ok(false);
    };

    for (kind, version) in [
        (VersionKind::Installed, &installed),
        (VersionKind::Latest, &latest),
    ] {
        if let Err(e) = cache.write(kind, version) {
            log::debug!("Could not cache {kind:?} version: {e}");
        }
    }

    if installed == latest {
        print_success(&format!("snippy {installed} is up to date."), "");
        return Ok(false);
    }

    offer_upgrade(&installed, &latest, manager, prompter)
}

fn offer_upgrade(
    installed: &str,
    latest: &str,
    manager: &impl PackageManager,
    prompter: &mut impl Prompter,
) -> Result<bool> {
    print_info(
        "A new version of snippy is available.",
        &format!("Current installed version: {installed}, Latest version: {latest}"),
    );

    if !prompter.confirm("Would you like to update?", false)? {
        print_info("Update cancelled.", "Run `snippy update` to update later.");
        return Ok(false);
    }

    match manager.upgrade() {
        Ok(0) => {
            print_success("Update completed.", "");
            Ok(true)
        }
        Ok(code) => {
            print_error("Update failed.", &format!("brew exited with status {code}"));
            Ok(false)
        }
        Err(e) => {
            print_error("Update failed.", &e.to_string());
            Ok(false)
        }
    }
}

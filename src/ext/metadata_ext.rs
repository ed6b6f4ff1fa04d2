use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

/// Access, modification and status-change timestamps of a [`Metadata`].
pub trait MetadataTimesExt {
    fn access_time(&self) -> io::Result<SystemTime>;
    fn modify_time(&self) -> io::Result<SystemTime>;
    fn change_time(&self) -> io::Result<SystemTime>;
}

impl MetadataTimesExt for Metadata {
    fn access_time(&self) -> io::Result<SystemTime> {
        self.accessed()
    }

    fn modify_time(&self) -> io::Result<SystemTime> {
        self.modified()
    }

    #[cfg(unix)]
    fn change_time(&self) -> io::Result<SystemTime> {
        use std::os::unix::fs::MetadataExt;
        use std::time::{Duration, UNIX_EPOCH};

        let seconds = self.ctime();
        let nanos = u32::try_from(self.ctime_nsec()).unwrap_or(0);
        let time = if seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::new(seconds.unsigned_abs(), nanos))
        } else {
            UNIX_EPOCH
                .checked_sub(Duration::from_secs(seconds.unsigned_abs()))
                .and_then(|t| t.checked_add(Duration::from_nanos(u64::from(nanos))))
        };
        time.ok_or_else(|| io::Error::other("status change time is out of range"))
    }

    // No status-change time outside unix; the last modification is the closest match.
    #[cfg(not(unix))]
    fn change_time(&self) -> io::Result<SystemTime> {
        self.modified()
    }
}

// indicatif hides itself on non-tty output, so long runs also log throughput
use {
    std::time::Instant,
    tracing::info,
};

pub struct Progress {
    message: String,
    started_at: Instant,
    reported_at: Instant,
    total_processed: u64,
}

impl Progress {
    pub fn new(message: String) -> Self {
        Self {
            message,
            started_at: Instant::now(),
            reported_at: Instant::now(),
            total_processed: 0,
        }
    }

    pub fn update(&mut self, processed: u64) -> bool {
        self.total_processed += processed;

        let now = Instant::now();
        if (now - self.reported_at).as_millis() >= 10_000 {
            self.reported_at = now;
            let rate = (self.total_processed as f32) / (now - self.started_at).as_secs_f32();
            info!("{}: {} total ({:.2}/second)", self.message, self.total_processed, rate);
            true
        } else {
            false
        }
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_update_but_reports_rarely() {
        let mut progress = Progress::new("embedding lyrics".to_owned());

        assert!(!progress.update(64));
        assert!(!progress.update(36));
        assert_eq!(progress.total_processed(), 100);
    }
}

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

pub const DEFAULT_SESSION: &str = "default";

#[derive(Debug, Clone, Default)]
pub struct GenerationGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl GenerationGate {
    pub fn try_acquire(&self, session_id: &str) -> Option<GenerationPermit> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(session_id.to_string()) {
            return None;
        }

        Some(GenerationPermit {
            session_id: session_id.to_string(),
            in_flight: self.in_flight.clone(),
        })
    }

    pub fn is_busy(&self, session_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(session_id)
    }
}

#[derive(Debug)]
pub struct GenerationPermit {
    session_id: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_for_the_same_session_is_refused() {
        let gate = GenerationGate::default();
        let permit = gate.try_acquire("a").unwrap();

        assert!(gate.try_acquire("a").is_none());
        assert!(gate.is_busy("a"));

        drop(permit);
        assert!(!gate.is_busy("a"));
        assert!(gate.try_acquire("a").is_some());
    }

    #[test]
    fn sessions_do_not_block_each_other() {
        let gate = GenerationGate::default();
        let _a = gate.try_acquire("a").unwrap();
        assert!(gate.try_acquire("b").is_some());
    }
}

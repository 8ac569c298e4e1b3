use std::{
    collections::HashMap,
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::solver::CancelToken;

static INTERRUPT_TOKENS: OnceLock<Mutex<HashMap<u64, CancelToken>>> = OnceLock::new();
static INTERRUPT_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();
static NEXT_REGISTRATION: AtomicU64 = AtomicU64::new(0);

fn interrupt_tokens() -> &'static Mutex<HashMap<u64, CancelToken>> {
    INTERRUPT_TOKENS.get_or_init(|| Mutex::new(HashMap::new()))
}

fn install_interrupt_hook_once() {
    INTERRUPT_HOOK_INSTALLED.get_or_init(|| {
        if let Err(err) = ctrlc::set_handler(cancel_registered) {
            log::warn!("interrupt: failed to install Ctrl-C handler err={err}");
        }
    });
}

fn cancel_registered() {
    let tokens: Vec<CancelToken> = match interrupt_tokens().lock() {
        Ok(guard) => guard.values().cloned().collect(),
        Err(_) => Vec::new(),
    };
    for token in &tokens {
        token.cancel();
    }
    log::warn!("interrupt: cancelling {} search(es)", tokens.len());
}

/// Keeps a token subscribed to Ctrl-C; dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "the token is unregistered as soon as the guard is dropped"]
pub struct InterruptGuard {
    id: u64,
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        if let Ok(mut guard) = interrupt_tokens().lock() {
            guard.remove(&self.id);
        }
    }
}

/// Cancels `token` when the process receives Ctrl-C, for as long as the
/// returned guard lives. The handler is installed on first use.
pub fn cancel_on_interrupt(token: &CancelToken) -> InterruptGuard {
    install_interrupt_hook_once();
    let id = NEXT_REGISTRATION.fetch_add(1, Ordering::Relaxed);
    if let Ok(mut guard) = interrupt_tokens().lock() {
        guard.insert(id, token.clone());
    }
    InterruptGuard { id }
}

#[cfg(test)]
mod tests {
    use super::{cancel_on_interrupt, cancel_registered, interrupt_tokens};
    use crate::solver::CancelToken;

    fn is_registered(id: u64) -> bool {
        interrupt_tokens()
            .lock()
            .expect("registry lock")
            .contains_key(&id)
    }

    #[test]
    fn registered_tokens_are_cancelled_together() {
        let first = CancelToken::new();
        let second = CancelToken::new();
        let _first_guard = cancel_on_interrupt(&first);
        let _second_guard = cancel_on_interrupt(&second);

        cancel_registered();

        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[test]
    fn dropping_the_guard_unregisters_the_token() {
        let token = CancelToken::new();
        let guard = cancel_on_interrupt(&token);
        let id = guard.id;
        assert!(is_registered(id));

        drop(guard);

        assert!(!is_registered(id));
    }

    #[test]
    fn repeated_registrations_do_not_accumulate() {
        let ids: Vec<u64> = (0..5)
            .map(|_| cancel_on_interrupt(&CancelToken::new()).id)
            .collect();
        assert!(ids.iter().all(|&id| !is_registered(id)));
    }
}

//! Search-as-you-type glue: [`Debouncer`] driven by `gloo_timers`.
use contracts::shared::debounce::Debouncer;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Handle owned by a search box. Pending searches are dropped when the
/// owning component unmounts or [`DebouncedSearch::cancel`] is called.
#[derive(Clone, Copy)]
pub struct DebouncedSearch {
    gate: StoredValue<Debouncer>,
}

pub fn use_debounced_search() -> DebouncedSearch {
    let gate = StoredValue::new(Debouncer::default());
    on_cleanup(move || {
        gate.try_update_value(|g| g.cancel());
    });
    DebouncedSearch { gate }
}

impl DebouncedSearch {
    /// Register a keystroke. `on_fire` runs with the trimmed term once no
    /// other keystroke arrived for `SEARCH_DEBOUNCE_MS`.
    pub fn input<F>(&self, term: String, on_fire: F)
    where
        F: FnOnce(String) + 'static,
    {
        let gate = self.gate;
        let Some((ticket, delay)) = gate.try_update_value(|g| (g.schedule(term), g.delay_ms()))
        else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if let Some(term) = gate.try_with_value(|g| g.fire(&ticket)).flatten() {
                on_fire(term);
            }
        });
    }

    pub fn cancel(&self) {
        self.gate.try_update_value(|g| g.cancel());
    }
}

use tokio::sync::mpsc;

/// Views a submitted form can navigate to. The reservation view itself is
/// entered through `ReservationModule::open_form`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Catalog,
}

/// Navigation callback injected into views.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: Route);
}

/// Forwards navigation requests over a channel to whoever drives the views.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(?route, "navigating");
        if self.tx.send(route).is_err() {
            tracing::warn!("navigation requested after the view driver went away");
        }
    }
}

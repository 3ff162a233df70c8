use crate::models::User;
use crate::store::Session;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn load_session() -> Session {
    let Some(storage) = local_storage() else {
        return Session::default();
    };
    let user = storage
        .get_item(USER_KEY)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str::<User>(&raw).ok());
    let token = storage.get_item(TOKEN_KEY).ok().flatten();
    Session::new(user, token)
}

/// Mirror the session into local storage; a signed-out session clears it.
pub fn save_session(session: &Session) {
    let (Some(user), Some(token)) = (&session.user, &session.token) else {
        clear_session();
        return;
    };
    let Some(storage) = local_storage() else {
        tracing::warn!("local storage unavailable, session not persisted");
        return;
    };
    match serde_json::to_string(user) {
        Ok(raw) => {
            let _ = storage.set_item(USER_KEY, &raw);
        }
        Err(err) => tracing::warn!(error = %err, "could not serialize user"),
    }
    let _ = storage.set_item(TOKEN_KEY, token);
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

use semana_agenda::{
  KeyValueStorage,
  StorageError
};

/// `window.localStorage` as a schedule backend.
#[derive(
  Debug, Clone, Copy, Default,
)]
pub struct LocalStorage;

fn local_storage()
-> Result<web_sys::Storage, StorageError> {
  web_sys::window()
    .ok_or_else(|| {
      StorageError::new(
        "no browser window"
      )
    })?
    .local_storage()
    .map_err(|error| {
      StorageError::new(format!(
        "localStorage access denied: \
         {error:?}"
      ))
    })?
    .ok_or_else(|| {
      StorageError::new(
        "localStorage unavailable"
      )
    })
}

impl KeyValueStorage for LocalStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    local_storage()?
      .get_item(key)
      .map_err(|error| {
        StorageError::new(format!(
          "localStorage read failed: \
           {error:?}"
        ))
      })
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    local_storage()?
      .set_item(key, value)
      .map_err(|error| {
        StorageError::new(format!(
          "localStorage write failed: \
           {error:?}"
        ))
      })
  }
}

/// Portuguese when the browser prefers it, English otherwise.
pub fn browser_locale()
-> semana_agenda::Locale {
  let language = web_sys::window()
    .and_then(|window| {
      window.navigator().language()
    })
    .unwrap_or_default();
  if language
    .to_ascii_lowercase()
    .starts_with("pt")
  {
    semana_agenda::Locale::Pt
  } else {
    semana_agenda::Locale::En
  }
}

//! Registry access abstraction for the Windows backend.
//!
//! Keys are paths relative to `HKEY_CURRENT_USER`, e.g. `SOFTWARE\Classes\foo`.
//! An empty value name addresses the key's default value.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Result;

pub trait RegistryStore {
    /// Write a string value, creating the key (and its parents) if needed.
    fn set_string(&self, key: &str, name: &str, value: &str) -> Result<()>;

    /// Read a string value; `None` if the key or value does not exist.
    fn get_string(&self, key: &str, name: &str) -> Result<Option<String>>;

    fn key_exists(&self, key: &str) -> Result<bool>;

    /// Delete a key with all subkeys. Returns `false` if it did not exist.
    fn delete_tree(&self, key: &str) -> Result<bool>;
}

impl<R: RegistryStore + ?Sized> RegistryStore for &R {
    fn set_string(&self, key: &str, name: &str, value: &str) -> Result<()> {
        (**self).set_string(key, name, value)
    }

    fn get_string(&self, key: &str, name: &str) -> Result<Option<String>> {
        (**self).get_string(key, name)
    }

    fn key_exists(&self, key: &str) -> Result<bool> {
        (**self).key_exists(key)
    }

    fn delete_tree(&self, key: &str) -> Result<bool> {
        (**self).delete_tree(key)
    }
}

/// In-memory registry with case-insensitive key and value names.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    keys: RefCell<BTreeMap<String, BTreeMap<String, String>>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys holding at least one value.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }
}

fn normalize(key: &str) -> String {
    key.trim_matches('\\').to_lowercase()
}

fn is_within(candidate: &str, key: &str) -> bool {
    candidate == key
        || candidate
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with('\\'))
}

impl RegistryStore for MemoryRegistry {
    fn set_string(&self, key: &str, name: &str, value: &str) -> Result<()> {
        self.keys
            .borrow_mut()
            .entry(normalize(key))
            .or_default()
            .insert(name.to_lowercase(), value.to_string());
        Ok(())
    }

    fn get_string(&self, key: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .keys
            .borrow()
            .get(&normalize(key))
            .and_then(|values| values.get(&name.to_lowercase()))
            .cloned())
    }

    fn key_exists(&self, key: &str) -> Result<bool> {
        let key = normalize(key);
        Ok(self.keys.borrow().keys().any(|k| is_within(k, &key)))
    }

    fn delete_tree(&self, key: &str) -> Result<bool> {
        let key = normalize(key);
        let mut keys = self.keys.borrow_mut();
        let before = keys.len();
        keys.retain(|k, _| !is_within(k, &key));
        Ok(keys.len() != before)
    }
}

/// The current user's hive (`HKEY_CURRENT_USER`).
#[cfg(target_os = "windows")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentUserRegistry;

#[cfg(target_os = "windows")]
mod win32 {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;

    use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
    use windows::Win32::System::Registry::{
        HKEY, HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, REG_OPTION_NON_VOLATILE, REG_SZ,
        RRF_RT_REG_SZ, RegCloseKey, RegCreateKeyExW, RegDeleteTreeW, RegGetValueW,
        RegOpenKeyExW, RegSetValueExW,
    };
    use windows::core::HSTRING;

    use super::{CurrentUserRegistry, RegistryStore};
    use crate::error::{Error, Result};

    /// Open key handle closed on drop.
    struct OwnedKey(HKEY);

    impl Drop for OwnedKey {
        fn drop(&mut self) {
            // SAFETY: the handle came from a successful RegCreateKeyExW/RegOpenKeyExW.
            unsafe {
                let _ = RegCloseKey(self.0);
            }
        }
    }

    fn create_key(subkey: &str) -> Result<OwnedKey> {
        let hkey_subkey = HSTRING::from(subkey);
        let mut key = HKEY::default();
        // SAFETY: RegCreateKeyExW creates or opens a registry key.
        unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                &hkey_subkey,
                0,
                None,
                REG_OPTION_NON_VOLATILE,
                KEY_WRITE,
                None,
                &mut key,
                None,
            )
            .ok()
            .map_err(|e| Error::registry(subkey, format!("failed to create key: {e}")))?;
        }
        Ok(OwnedKey(key))
    }

    fn to_wide(value: &str) -> Vec<u16> {
        OsStr::new(value)
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    }

    impl RegistryStore for CurrentUserRegistry {
        fn set_string(&self, key: &str, name: &str, value: &str) -> Result<()> {
            let handle = create_key(key)?;
            let name = HSTRING::from(name);
            let wide = to_wide(value);
            // SAFETY: RegSetValueExW writes a REG_SZ value; `wide` outlives the call.
            unsafe {
                RegSetValueExW(
                    handle.0,
                    &name,
                    0,
                    REG_SZ,
                    Some(std::slice::from_raw_parts(
                        wide.as_ptr().cast::<u8>(),
                        wide.len() * 2,
                    )),
                )
                .ok()
                .map_err(|e| Error::registry(key, format!("failed to set value: {e}")))?;
            }
            Ok(())
        }

        fn get_string(&self, key: &str, name: &str) -> Result<Option<String>> {
            let subkey = HSTRING::from(key);
            let value_name = HSTRING::from(name);

            let mut size: u32 = 0;
            // SAFETY: RegGetValueW with null buffer queries the required size.
            let status = unsafe {
                RegGetValueW(
                    HKEY_CURRENT_USER,
                    &subkey,
                    &value_name,
                    RRF_RT_REG_SZ,
                    None,
                    None,
                    Some(&mut size),
                )
            };
            if status == ERROR_FILE_NOT_FOUND {
                return Ok(None);
            }
            status
                .ok()
                .map_err(|e| Error::registry(key, format!("failed to query value size: {e}")))?;

            let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
            // SAFETY: RegGetValueW reads the value into `buffer`, sized by the previous call.
            unsafe {
                RegGetValueW(
                    HKEY_CURRENT_USER,
                    &subkey,
                    &value_name,
                    RRF_RT_REG_SZ,
                    None,
                    Some(buffer.as_mut_ptr().cast()),
                    Some(&mut size),
                )
                .ok()
                .map_err(|e| Error::registry(key, format!("failed to read value: {e}")))?;
            }

            buffer.truncate((size as usize) / 2);
            while buffer.last() == Some(&0) {
                buffer.pop();
            }
            String::from_utf16(&buffer)
                .map(Some)
                .map_err(|e| Error::registry(key, format!("invalid UTF-16 in value: {e}")))
        }

        fn key_exists(&self, key: &str) -> Result<bool> {
            let subkey = HSTRING::from(key);
            let mut handle = HKEY::default();
            // SAFETY: RegOpenKeyExW opens an existing key for reading.
            let status =
                unsafe { RegOpenKeyExW(HKEY_CURRENT_USER, &subkey, 0, KEY_READ, &mut handle) };
            if status == ERROR_FILE_NOT_FOUND {
                return Ok(false);
            }
            status
                .ok()
                .map_err(|e| Error::registry(key, format!("failed to open key: {e}")))?;
            let _key = OwnedKey(handle);
            Ok(true)
        }

        fn delete_tree(&self, key: &str) -> Result<bool> {
            let subkey = HSTRING::from(key);
            // SAFETY: RegDeleteTreeW removes the key and all of its subkeys and values.
            let status = unsafe { RegDeleteTreeW(HKEY_CURRENT_USER, &subkey) };
            if status == ERROR_FILE_NOT_FOUND {
                return Ok(false);
            }
            status
                .ok()
                .map_err(|e| Error::registry(key, format!("failed to delete key: {e}")))?;
            Ok(true)
        }
    }
}

use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ, REG_SZ};
use winreg::types::FromRegValue;
use winreg::RegKey;

use super::{RegistryError, RegistryHive, RegistryResult};

/// `HKEY_LOCAL_MACHINE`, opened read-only.
pub struct WindowsHive {
    root: RegKey,
}

/// An open key together with the path it was opened from. Closed on drop.
pub struct WindowsKey {
    key: RegKey,
    path: String,
}

impl WindowsHive {
    pub fn local_machine() -> Self {
        Self { root: RegKey::predef(HKEY_LOCAL_MACHINE) }
    }
}

impl RegistryHive for WindowsHive {
    type Key = WindowsKey;

    fn open_key(&self, path: &str) -> RegistryResult<WindowsKey> {
        let key = self.root.open_subkey_with_flags(path, KEY_READ).map_err(|err| {
            RegistryError::Access { path: path.to_string(), reason: err.to_string() }
        })?;
        Ok(WindowsKey { key, path: path.to_string() })
    }

    fn subkey_names(&self, key: &WindowsKey) -> Vec<String> {
        key.key.enum_keys().map_while(Result::ok).collect()
    }

    fn string_value(&self, key: &WindowsKey, name: &str) -> RegistryResult<String> {
        let value_error =
            || RegistryError::ValueRead { path: key.path.clone(), name: name.to_string() };
        let raw = key.key.get_raw_value(name).map_err(|_| value_error())?;
        if raw.vtype != REG_SZ {
            return Err(value_error());
        }
        String::from_reg_value(&raw).map_err(|_| value_error())
    }
}

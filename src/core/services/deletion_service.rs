use std::io::Write;

use age::secrecy::SecretString;

use crate::core::errors::{KeyboxError, Result};
use crate::core::models::delete_intent::DeleteIntent;
use crate::core::models::delete_outcome::{DeleteOutcome, DeletedKey};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::key_store::KeyStore;
use crate::core::traits::prompter::Prompter;

const CONFIRM_REFERENCE_DELETE: &str = "Key reference will be deleted. Continue?";
const PASSPHRASE_PROMPT: &str = "DANGER - enter passphrase to permanently delete key:";

/// Decides how a key may be deleted and performs the deletion
/// through a `KeyStore` backend.
///
/// Offline and ledger records take the reference path: an optional yes/no
/// confirmation, then removal without any passphrase. Local records take
/// the secret path: a passphrase is demanded only by the legacy store and
/// only when not forced. The two prompts are never combined.
pub struct DeletionService<K: KeyStore> {
    pub store: K,
}

impl<K: KeyStore> DeletionService<K> {
    /// Resolve a single record by name.
    pub fn get(&self, name: &str) -> Result<KeyRecord> {
        KeyRecord::validate_name(name)?;
        self.store.get(name)
    }

    /// List every record in the store.
    pub fn list(&self) -> Result<Vec<KeyRecord>> {
        self.store.list()
    }

    /// Delete the key named by `intent`.
    ///
    /// Performs one lookup, at most one prompt and one store deletion.
    /// Any error ends the invocation unchanged; nothing is retried. On
    /// success a status line is written to `status` and the removed
    /// record is returned. Once the store has deleted the key the call
    /// succeeds; a failed status write is reported in `status_error`.
    pub fn delete(
        &self,
        intent: &DeleteIntent,
        prompter: &mut dyn Prompter,
        status: &mut dyn Write,
    ) -> Result<DeletedKey> {
        let record = self.get(&intent.name)?;

        let outcome = if record.category.holds_secret() {
            self.delete_secret(&record, intent, prompter)?
        } else {
            self.delete_reference(&record, intent, prompter)?
        };

        let status_error = writeln!(status, "{}", outcome.status_message())
            .and_then(|()| status.flush())
            .err()
            .map(|e| e.to_string());

        Ok(DeletedKey {
            record,
            outcome,
            status_error,
        })
    }

    fn delete_reference(
        &self,
        record: &KeyRecord,
        intent: &DeleteIntent,
        prompter: &mut dyn Prompter,
    ) -> Result<DeleteOutcome> {
        if !intent.skip_confirmation && !prompter.confirm(CONFIRM_REFERENCE_DELETE)? {
            return Err(KeyboxError::Aborted);
        }

        self.store
            .delete(&record.name, &SecretString::from(String::new()), true)?;
        Ok(DeleteOutcome::ReferenceRemoved)
    }

    fn delete_secret(
        &self,
        record: &KeyRecord,
        intent: &DeleteIntent,
        prompter: &mut dyn Prompter,
    ) -> Result<DeleteOutcome> {
        let needs_passphrase = intent.needs_passphrase();

        let passphrase = if needs_passphrase {
            prompter.read_passphrase(PASSPHRASE_PROMPT)?
        } else {
            SecretString::from(String::new())
        };

        self.store
            .delete(&record.name, &passphrase, !needs_passphrase)?;
        Ok(DeleteOutcome::SecretDestroyed)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, VecDeque};

    use age::secrecy::ExposeSecret;

    use super::*;
    use crate::core::models::key_record::KeyCategory;

    /// Arguments of one delete call seen by the in-memory store.
    #[derive(Debug, Clone, PartialEq)]
    struct DeleteCall {
        name: String,
        passphrase: String,
        skip_check: bool,
    }

    /// In-memory store that verifies passphrases of local keys.
    struct MemoryStore {
        records: RefCell<BTreeMap<String, (KeyRecord, String)>>,
        calls: RefCell<Vec<DeleteCall>>,
    }

    impl MemoryStore {
        fn with(records: &[(&str, KeyCategory, &str)]) -> Self {
            let map = records
                .iter()
                .map(|(name, category, pass)| {
                    let record = KeyRecord {
                        name: name.to_string(),
                        category: *category,
                        public_key: format!("pub-{name}"),
                        hd_path: None,
                        created_at: None,
                    };
                    (name.to_string(), (record, pass.to_string()))
                })
                .collect();
            Self {
                records: RefCell::new(map),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn contains(&self, name: &str) -> bool {
            self.records.borrow().contains_key(name)
        }
    }

    impl KeyStore for MemoryStore {
        fn get(&self, name: &str) -> Result<KeyRecord> {
            self.records
                .borrow()
                .get(name)
                .map(|(r, _)| r.clone())
                .ok_or_else(|| KeyboxError::NotFound {
                    name: name.to_string(),
                })
        }

        fn delete(&self, name: &str, passphrase: &SecretString, skip: bool) -> Result<()> {
            self.calls.borrow_mut().push(DeleteCall {
                name: name.to_string(),
                passphrase: passphrase.expose_secret().to_string(),
                skip_check: skip,
            });

            let mut records = self.records.borrow_mut();
            let (record, expected) = records.get(name).ok_or_else(|| KeyboxError::NotFound {
                name: name.to_string(),
            })?;
            if record.category.holds_secret() && !skip && passphrase.expose_secret() != expected
            {
                return Err(KeyboxError::Unauthorized {
                    name: name.to_string(),
                });
            }
            records.remove(name);
            Ok(())
        }

        fn list(&self) -> Result<Vec<KeyRecord>> {
            Ok(self.records.borrow().values().map(|(r, _)| r.clone()).collect())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    /// Prompter answering from a script and counting each kind of prompt.
    #[derive(Default)]
    struct ScriptedPrompter {
        confirms: VecDeque<bool>,
        passphrases: VecDeque<String>,
        confirm_calls: usize,
        passphrase_calls: usize,
    }

    impl ScriptedPrompter {
        fn confirming(answer: bool) -> Self {
            Self {
                confirms: VecDeque::from([answer]),
                ..Self::default()
            }
        }

        fn with_passphrase(pass: &str) -> Self {
            Self {
                passphrases: VecDeque::from([pass.to_string()]),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, _question: &str) -> Result<bool> {
            self.confirm_calls += 1;
            self.confirms.pop_front().ok_or_else(|| KeyboxError::Input {
                detail: "unexpected confirmation prompt".into(),
            })
        }

        fn read_passphrase(&mut self, _prompt: &str) -> Result<SecretString> {
            self.passphrase_calls += 1;
            self.passphrases
                .pop_front()
                .map(SecretString::from)
                .ok_or_else(|| KeyboxError::Input {
                    detail: "unexpected passphrase prompt".into(),
                })
        }
    }

    /// Sink whose every write fails, like a closed stderr.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn intent(name: &str, skip: bool, force: bool, legacy: bool) -> DeleteIntent {
        DeleteIntent {
            name: name.to_string(),
            skip_confirmation: skip,
            force_no_passphrase: force,
            use_legacy_store: legacy,
        }
    }

    fn service(records: &[(&str, KeyCategory, &str)]) -> DeletionService<MemoryStore> {
        DeletionService {
            store: MemoryStore::with(records),
        }
    }

    #[test]
    fn local_legacy_key_with_correct_passphrase_is_destroyed() {
        let svc = service(&[("alice", KeyCategory::Local, "hunter22")]);
        let mut prompter = ScriptedPrompter::with_passphrase("hunter22");
        let mut status: Vec<u8> = Vec::new();

        let deleted = svc
            .delete(&intent("alice", false, false, true), &mut prompter, &mut status)
            .unwrap();

        assert_eq!(deleted.outcome, DeleteOutcome::SecretDestroyed);
        assert_eq!(deleted.record.name, "alice");
        assert_eq!(prompter.passphrase_calls, 1);
        assert_eq!(prompter.confirm_calls, 0);
        assert!(!svc.store.contains("alice"));
        assert_eq!(
            String::from_utf8(status).unwrap().trim_end(),
            DeleteOutcome::SecretDestroyed.status_message()
        );
        assert_eq!(
            svc.store.calls.borrow()[0],
            DeleteCall {
                name: "alice".into(),
                passphrase: "hunter22".into(),
                skip_check: false,
            }
        );
    }

    #[test]
    fn ledger_reference_removed_without_prompt_when_skipping_confirmation() {
        let svc = service(&[("bob", KeyCategory::Ledger, "")]);
        let mut prompter = ScriptedPrompter::default();
        let mut status: Vec<u8> = Vec::new();

        let deleted = svc
            .delete(&intent("bob", true, false, false), &mut prompter, &mut status)
            .unwrap();

        assert_eq!(deleted.outcome, DeleteOutcome::ReferenceRemoved);
        assert_eq!(deleted.record.category, KeyCategory::Ledger);
        assert_eq!(prompter.confirm_calls, 0);
        assert_eq!(prompter.passphrase_calls, 0);
        assert!(!svc.store.contains("bob"));
        assert!(
            String::from_utf8(status)
                .unwrap()
                .contains("reference deleted")
        );
    }

    #[test]
    fn declined_confirmation_aborts_without_mutation() {
        let svc = service(&[("carol", KeyCategory::Offline, "")]);
        let mut prompter = ScriptedPrompter::confirming(false);
        let mut status: Vec<u8> = Vec::new();

        let err = svc
            .delete(&intent("carol", false, false, false), &mut prompter, &mut status)
            .unwrap_err();

        assert!(matches!(err, KeyboxError::Aborted));
        assert!(svc.store.contains("carol"));
        assert!(svc.store.calls.borrow().is_empty());
        assert!(status.is_empty());
    }

    #[test]
    fn confirmed_reference_delete_passes_empty_passphrase_and_skips_check() {
        let svc = service(&[("carol", KeyCategory::Offline, "")]);
        let mut prompter = ScriptedPrompter::confirming(true);

        svc.delete(
            &intent("carol", false, false, true),
            &mut prompter,
            &mut Vec::<u8>::new(),
        )
        .unwrap();

        assert_eq!(prompter.confirm_calls, 1);
        assert_eq!(
            svc.store.calls.borrow()[0],
            DeleteCall {
                name: "carol".into(),
                passphrase: String::new(),
                skip_check: true,
            }
        );
    }

    #[test]
    fn reference_path_never_asks_for_passphrase() {
        for category in [KeyCategory::Offline, KeyCategory::Ledger] {
            for force in [false, true] {
                for legacy in [false, true] {
                    let svc = service(&[("ref", category, "")]);
                    let mut prompter = ScriptedPrompter::confirming(true);

                    svc.delete(
                        &intent("ref", false, force, legacy),
                        &mut prompter,
                        &mut Vec::<u8>::new(),
                    )
                    .unwrap();

                    assert_eq!(prompter.passphrase_calls, 0);
                    assert_eq!(prompter.confirm_calls, 1);
                }
            }
        }
    }

    #[test]
    fn keyring_store_local_key_needs_no_passphrase() {
        let svc = service(&[("alice", KeyCategory::Local, "secret")]);
        let mut prompter = ScriptedPrompter::default();

        let deleted = svc
            .delete(
                &intent("alice", false, false, false),
                &mut prompter,
                &mut Vec::<u8>::new(),
            )
            .unwrap();

        assert_eq!(deleted.outcome, DeleteOutcome::SecretDestroyed);
        assert_eq!(prompter.passphrase_calls, 0);
        assert_eq!(prompter.confirm_calls, 0);
        assert!(svc.store.calls.borrow()[0].skip_check);
    }

    #[test]
    fn forced_legacy_delete_skips_passphrase() {
        let svc = service(&[("alice", KeyCategory::Local, "secret")]);
        let mut prompter = ScriptedPrompter::default();

        svc.delete(
            &intent("alice", false, true, true),
            &mut prompter,
            &mut Vec::<u8>::new(),
        )
        .unwrap();

        assert_eq!(prompter.passphrase_calls, 0);
        assert!(svc.store.calls.borrow()[0].skip_check);
        assert!(!svc.store.contains("alice"));
    }

    #[test]
    fn wrong_passphrase_is_unauthorized_and_keeps_key() {
        let svc = service(&[("alice", KeyCategory::Local, "right")]);
        let mut prompter = ScriptedPrompter::with_passphrase("wrong");
        let mut status: Vec<u8> = Vec::new();

        let err = svc
            .delete(&intent("alice", false, false, true), &mut prompter, &mut status)
            .unwrap_err();

        assert!(matches!(err, KeyboxError::Unauthorized { .. }));
        assert!(svc.store.contains("alice"));
        assert!(status.is_empty());
    }

    #[test]
    fn failed_passphrase_read_stops_before_mutation() {
        let svc = service(&[("alice", KeyCategory::Local, "right")]);
        let mut prompter = ScriptedPrompter::default();

        let err = svc
            .delete(
                &intent("alice", false, false, true),
                &mut prompter,
                &mut Vec::<u8>::new(),
            )
            .unwrap_err();

        assert!(matches!(err, KeyboxError::Input { .. }));
        assert!(svc.store.calls.borrow().is_empty());
        assert!(svc.store.contains("alice"));
    }

    #[test]
    fn missing_key_is_not_found_without_prompting() {
        let svc = service(&[("alice", KeyCategory::Local, "x")]);
        let mut prompter = ScriptedPrompter::default();

        for flags in [(false, false, false), (true, true, true), (false, false, true)] {
            let err = svc
                .delete(
                    &intent("nobody", flags.0, flags.1, flags.2),
                    &mut prompter,
                    &mut Vec::<u8>::new(),
                )
                .unwrap_err();
            assert!(matches!(err, KeyboxError::NotFound { ref name } if name == "nobody"));
        }

        assert_eq!(prompter.confirm_calls + prompter.passphrase_calls, 0);
        assert!(svc.store.calls.borrow().is_empty());
        assert!(svc.store.contains("alice"));
    }

    #[test]
    fn second_delete_of_same_key_is_not_found() {
        let svc = service(&[("alice", KeyCategory::Local, "pw")]);

        svc.delete(
            &intent("alice", false, false, true),
            &mut ScriptedPrompter::with_passphrase("pw"),
            &mut Vec::<u8>::new(),
        )
        .unwrap();
        assert!(matches!(
            svc.get("alice"),
            Err(KeyboxError::NotFound { .. })
        ));

        let err = svc
            .delete(
                &intent("alice", false, false, true),
                &mut ScriptedPrompter::with_passphrase("pw"),
                &mut Vec::<u8>::new(),
            )
            .unwrap_err();
        assert!(matches!(err, KeyboxError::NotFound { .. }));
    }

    #[test]
    fn invalid_name_rejected_before_lookup() {
        let svc = service(&[]);
        let err = svc
            .delete(
                &intent("../etc", true, true, true),
                &mut ScriptedPrompter::default(),
                &mut Vec::<u8>::new(),
            )
            .unwrap_err();
        assert!(matches!(err, KeyboxError::InvalidKeyName { .. }));
    }

    #[test]
    fn status_lines_differ_between_outcomes() {
        assert_ne!(
            DeleteOutcome::ReferenceRemoved.status_message(),
            DeleteOutcome::SecretDestroyed.status_message()
        );
    }

    #[test]
    fn failed_status_write_still_reports_deletion() {
        let svc = service(&[("alice", KeyCategory::Local, "pw")]);

        let deleted = svc
            .delete(
                &intent("alice", false, false, true),
                &mut ScriptedPrompter::with_passphrase("pw"),
                &mut BrokenSink,
            )
            .unwrap();

        assert_eq!(deleted.outcome, DeleteOutcome::SecretDestroyed);
        assert!(deleted.status_error.is_some());
        assert!(!svc.store.contains("alice"));
    }

    #[test]
    fn written_status_leaves_no_error() {
        let svc = service(&[("bob", KeyCategory::Ledger, "")]);

        let deleted = svc
            .delete(
                &intent("bob", true, false, false),
                &mut ScriptedPrompter::default(),
                &mut Vec::<u8>::new(),
            )
            .unwrap();

        assert_eq!(deleted.status_error, None);
    }
}

//! Android applier
//!
//! Plain classes are copied into their `res`/`assets` directory. Fonts are
//! copied into `res/font`, merged into the family descriptor named after
//! the font's family, and registered with `ReactFontManager` in
//! `MainApplication.onCreate`. Fonts whose tables cannot be read fall back
//! to a copy in `assets/fonts`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::domain::entities::AssetEntry;
use crate::domain::ports::{LinkEventSink, WarningKind};
use crate::domain::services::source_patcher::{
    add_import, has_usage, insert_in_method, remove_lines,
};
use crate::domain::services::{
    font_reference, normalize_name, FontDescriptor, FontFamily, PatchOutcome, SourceLanguage,
};
use crate::domain::value_objects::{
    AssetClass, LinkPolicy, Platform, ANDROID_FONT_DIR, ANDROID_LEGACY_FONT_DIR,
};
use crate::error::{LinkError, LinkResult};
use crate::infrastructure::android::{
    find_main_application, font_documents, parse_font_family, render_font_family,
};
use crate::infrastructure::font::read_metadata;

use super::{extension_of, stem_of, ApplyContext, PlatformApplier};
use crate::application::staged::StagedWrites;

const FONT_MANAGER: &str = "ReactFontManager";
const FONT_MANAGER_IMPORT: &str = "com.facebook.react.views.text.ReactFontManager";
const APPLICATION_CLASS: &str = "MainApplication";
const REGISTRATION_METHOD: &str = "onCreate";
const REGISTRATION_ANCHOR: &str = "super.onCreate()";

/// Registration call for one family, without terminator
fn registration_statement(family: &str, family_id: &str) -> String {
    let escaped = family.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "{}.getInstance().addCustomFont(this, \"{}\", R.font.{})",
        FONT_MANAGER, escaped, family_id
    )
}

/// Marker identifying a family's registration line
fn registration_marker(family_id: &str) -> String {
    format!("R.font.{})", family_id)
}

pub struct AndroidApplier<'a> {
    platform_root: PathBuf,
    sink: &'a dyn LinkEventSink,
    /// Families linked in this run: id -> display name
    registered: IndexMap<String, String>,
    /// Families whose descriptor was emptied in this run
    retracted: Vec<String>,
}

impl<'a> AndroidApplier<'a> {
    pub fn new(context: ApplyContext<'a>) -> Self {
        Self {
            platform_root: context.platform_root,
            sink: context.sink,
            registered: IndexMap::new(),
            retracted: Vec::new(),
        }
    }

    fn font_dir(&self) -> PathBuf {
        self.platform_root.join(ANDROID_FONT_DIR)
    }

    fn legacy_font_dir(&self) -> PathBuf {
        self.platform_root.join(ANDROID_LEGACY_FONT_DIR)
    }

    fn family_path(&self, family_id: &str) -> PathBuf {
        self.font_dir().join(format!("{}.xml", family_id))
    }

    fn warn(&self, kind: WarningKind, message: String) {
        self.sink.warn(Some(Platform::Android), kind, message);
    }

    /// Parsed descriptor at `path`; unreadable documents are reported and
    /// left alone
    fn load_family(
        &self,
        staged: &mut StagedWrites<'_>,
        path: &Path,
    ) -> LinkResult<Option<FontFamily>> {
        let Some(text) = staged.read(path)? else {
            return Ok(Some(FontFamily::new()));
        };
        match parse_font_family(&text) {
            Ok(family) => Ok(Some(family)),
            Err(err) => {
                self.warn(
                    WarningKind::NativeFileUnreadable,
                    format!("{}: {}; leaving it unchanged", path.display(), err),
                );
                Ok(None)
            }
        }
    }

    /// Stage a descriptor, or its deletion when it has no entries left
    fn store_family(
        &mut self,
        staged: &mut StagedWrites<'_>,
        path: &Path,
        family: &FontFamily,
    ) -> LinkResult<()> {
        if family.is_empty() {
            staged.delete(path)?;
            if let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) {
                if !self.retracted.contains(&id) {
                    self.retracted.push(id);
                }
            }
            return Ok(());
        }
        match render_font_family(family) {
            Ok(xml) => staged.write(path, xml),
            Err(err) => {
                self.warn(
                    WarningKind::NativeFileUnreadable,
                    format!("{}: {}", path.display(), err),
                );
                Ok(())
            }
        }
    }

    fn link_font(&mut self, entry: &AssetEntry, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        let bytes = staged
            .fs()
            .read_bytes(entry.path())
            .map_err(|e| LinkError::fs("read", entry.path(), e))?;

        let metadata = match read_metadata(&bytes) {
            Ok(metadata) => metadata,
            Err(err) => {
                self.warn(
                    WarningKind::FontUnreadable,
                    format!(
                        "{}: {}; copying to {}",
                        entry.basename(),
                        err,
                        ANDROID_LEGACY_FONT_DIR
                    ),
                );
                staged.copy(entry.path(), self.legacy_font_dir().join(entry.basename()));
                return Ok(());
            }
        };

        let descriptor = FontDescriptor::new(
            &metadata.family,
            &stem_of(entry),
            metadata.weight_class,
            metadata.is_italic,
        );
        let file_name = format!("{}.{}", descriptor.font_id, extension_of(entry));
        staged.copy(entry.path(), self.font_dir().join(file_name));

        let path = self.family_path(&descriptor.family_id);
        let Some(mut family) = self.load_family(staged, &path)? else {
            return Ok(());
        };
        family.upsert(descriptor.entry());
        self.store_family(staged, &path, &family)?;
        self.sink.info(
            Platform::Android,
            format!(
                "{} -> {} ({} {})",
                entry.basename(),
                descriptor.family_id,
                descriptor.weight,
                descriptor.style
            ),
        );
        self.registered
            .insert(descriptor.family_id, descriptor.family);
        Ok(())
    }

    /// Resource id a removed font was copied under. A face whose stem equals
    /// its family id carries a `_font` suffix, visible in that family's
    /// descriptor.
    fn removed_font_id(&self, staged: &mut StagedWrites<'_>, stem: &str) -> LinkResult<String> {
        let id = normalize_name(stem);
        let suffixed = format!("{}_font", id);
        let path = self.family_path(&id);
        let uses_suffix = match staged.read(&path)? {
            Some(text) => parse_font_family(&text)
                .map(|family| family.references(&font_reference(&suffixed)))
                .unwrap_or(false),
            None => false,
        };
        Ok(if uses_suffix { suffixed } else { id })
    }

    fn clean_font(&mut self, entry: &AssetEntry, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        let font_id = self.removed_font_id(staged, &stem_of(entry))?;
        let reference = font_reference(&font_id);

        let font_dir = self.font_dir();
        let mut documents = font_documents(&font_dir);
        for created in staged.created_in(&font_dir) {
            if !documents.contains(&created) {
                documents.push(created);
            }
        }

        for path in documents {
            if !staged.will_exist(&path) {
                continue;
            }
            let Some(mut family) = self.load_family(staged, &path)? else {
                continue;
            };
            if family.remove_font(&reference) {
                self.store_family(staged, &path, &family)?;
            }
        }

        staged.remove(font_dir.join(format!("{}.{}", font_id, extension_of(entry))));
        staged.remove(self.legacy_font_dir().join(entry.basename()));
        Ok(())
    }

    /// Register linked families and retract emptied ones in `MainApplication`
    fn patch_application(&mut self, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        let registrations: Vec<(String, String)> = self
            .registered
            .iter()
            .filter(|(id, _)| staged.will_exist(&self.family_path(id)))
            .map(|(id, family)| (id.clone(), family.clone()))
            .collect();
        let retractions: Vec<String> = self
            .retracted
            .iter()
            .filter(|id| !staged.will_exist(&self.family_path(id)))
            .cloned()
            .collect();
        if registrations.is_empty() && retractions.is_empty() {
            return Ok(());
        }

        let Some(source) = find_main_application(&self.platform_root) else {
            self.warn(
                WarningKind::SourceNotFound,
                format!(
                    "MainApplication not found under {}; fonts are not registered",
                    self.platform_root.display()
                ),
            );
            return Ok(());
        };
        let Some(language) = SourceLanguage::from_path(&source) else {
            return Ok(());
        };
        let Some(original) = staged.read(&source)? else {
            return Ok(());
        };

        let mut text = original.clone();
        for id in &retractions {
            text = remove_lines(&text, &registration_marker(id)).into_text(&text);
        }

        // Inserted right after the anchor, so go backwards to keep order
        for (id, family) in registrations.iter().rev() {
            let statement = language.statement(&registration_statement(family, id));
            match insert_in_method(
                &text,
                language,
                APPLICATION_CLASS,
                REGISTRATION_METHOD,
                &statement,
                Some(REGISTRATION_ANCHOR),
            ) {
                PatchOutcome::Changed(patched) => text = patched,
                PatchOutcome::Unchanged => {}
                PatchOutcome::Failed(err) => self.warn(
                    WarningKind::PatchFailed,
                    format!("{}: {}", source.display(), err),
                ),
            }
        }

        if has_usage(&text, FONT_MANAGER) {
            text = add_import(&text, language, FONT_MANAGER_IMPORT).into_text(&text);
        } else if !retractions.is_empty() {
            let import = format!("import {}", FONT_MANAGER_IMPORT);
            text = remove_lines(&text, &import).into_text(&text);
        }

        if text != original {
            staged.write(&source, text)?;
        }
        Ok(())
    }
}

impl PlatformApplier for AndroidApplier<'_> {
    fn clean(
        &mut self,
        class: AssetClass,
        entries: &[AssetEntry],
        staged: &mut StagedWrites<'_>,
    ) -> LinkResult<()> {
        match class.policy(Platform::Android) {
            LinkPolicy::CopyInto(dir) => {
                for entry in entries {
                    staged.remove(self.platform_root.join(dir).join(entry.basename()));
                }
            }
            LinkPolicy::AndroidFont => {
                for entry in entries {
                    self.clean_font(entry, staged)?;
                }
            }
            LinkPolicy::XcodeResource { .. } => {}
        }
        Ok(())
    }

    fn link(
        &mut self,
        class: AssetClass,
        entries: &[AssetEntry],
        staged: &mut StagedWrites<'_>,
    ) -> LinkResult<()> {
        match class.policy(Platform::Android) {
            LinkPolicy::CopyInto(dir) => {
                for entry in entries {
                    staged.copy(
                        entry.path(),
                        self.platform_root.join(dir).join(entry.basename()),
                    );
                }
            }
            LinkPolicy::AndroidFont => {
                for entry in entries {
                    self.link_font(entry, staged)?;
                }
            }
            LinkPolicy::XcodeResource { .. } => {}
        }
        Ok(())
    }

    fn finish(&mut self, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        self.patch_application(staged)
    }
}

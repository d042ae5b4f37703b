//! Apple applier (iOS and macOS)
//!
//! Assets are referenced from the Xcode project in place: each one becomes a
//! file reference in the resources group plus a build file in the target's
//! resources phase. Fonts are also declared in `Info.plist` (`UIAppFonts` on
//! iOS, `ATSApplicationFontsPath` on macOS).

use std::path::PathBuf;

use crate::domain::entities::{relative_to, to_posix, AssetEntry};
use crate::domain::ports::{LinkEvent, LinkEventSink, WarningKind};
use crate::domain::value_objects::{AssetClass, LinkPolicy, Platform};
use crate::error::LinkResult;
use crate::infrastructure::xcode::{
    add_app_fonts, find_pbxproj, info_plist_path, parse_plist, remove_app_fonts, render_plist,
    resource_group_path, set_fonts_path, ObjectId, PbxprojError, XcodeProject,
};

use super::{ApplyContext, PlatformApplier};
use crate::application::staged::StagedWrites;

const INFO_PLIST_SETTING: &str = "INFOPLIST_FILE";

struct LoadedProject {
    path: PathBuf,
    project: XcodeProject,
    target: ObjectId,
}

enum ProjectState {
    Unloaded,
    Unavailable,
    Loaded(LoadedProject),
}

pub struct AppleApplier<'a> {
    platform: Platform,
    platform_root: PathBuf,
    flavor: Option<String>,
    sink: &'a dyn LinkEventSink,
    state: ProjectState,
    fonts_added: Vec<String>,
    fonts_removed: Vec<String>,
}

impl<'a> AppleApplier<'a> {
    pub fn new(context: ApplyContext<'a>) -> Self {
        // Targets are only named for iOS; macOS uses its platform target
        let flavor = match context.platform {
            Platform::Ios => context.ios_target,
            _ => None,
        };
        Self {
            platform: context.platform,
            platform_root: context.platform_root,
            flavor,
            sink: context.sink,
            state: ProjectState::Unloaded,
            fonts_added: Vec::new(),
            fonts_removed: Vec::new(),
        }
    }

    fn warn(&self, kind: WarningKind, message: String) {
        self.sink.warn(Some(self.platform), kind, message);
    }

    /// Path of an asset as referenced from the project
    fn project_path(&self, entry: &AssetEntry) -> String {
        to_posix(&relative_to(entry.path(), &self.platform_root))
    }

    /// Parse the project and resolve the target on first use
    fn load(&mut self, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        if !matches!(self.state, ProjectState::Unloaded) {
            return Ok(());
        }
        self.state = ProjectState::Unavailable;

        let Some(path) = find_pbxproj(&self.platform_root) else {
            self.warn(
                WarningKind::ProjectMissing,
                format!(
                    "no Xcode project in {}; skipping project registration",
                    self.platform_root.display()
                ),
            );
            return Ok(());
        };
        let Some(text) = staged.read(&path)? else {
            return Ok(());
        };
        let project = match XcodeProject::parse(text) {
            Ok(project) => project,
            Err(err) => {
                self.warn(
                    WarningKind::NativeFileUnreadable,
                    format!("{}: {}", path.display(), err),
                );
                return Ok(());
            }
        };

        let target = match &self.flavor {
            Some(name) => project.find_target(name),
            None => project.platform_target(self.platform),
        };
        let Some(target) = target else {
            let wanted = self
                .flavor
                .clone()
                .unwrap_or_else(|| self.platform.display_name().to_string());
            self.warn(
                WarningKind::ProjectMissing,
                format!("no {} target in {}", wanted, path.display()),
            );
            return Ok(());
        };

        self.state = ProjectState::Loaded(LoadedProject {
            path,
            project,
            target,
        });
        Ok(())
    }

    /// Drop a project whose edit failed; nothing of it is written
    fn abandon(&mut self, err: PbxprojError) {
        if let ProjectState::Loaded(loaded) = &self.state {
            let message = format!("{}: {}; project left unchanged", loaded.path.display(), err);
            self.warn(WarningKind::NativeFileUnreadable, message);
        }
        self.state = ProjectState::Unavailable;
    }

    /// Link paths into the resources group; also returns the group path when
    /// the group had to be created
    fn link_entries(
        &mut self,
        paths: &[String],
    ) -> Result<(Vec<String>, Option<String>), PbxprojError> {
        let ProjectState::Loaded(loaded) = &mut self.state else {
            return Ok((Vec::new(), None));
        };
        let group_path = resource_group_path(self.flavor.as_deref());
        let (group, created) = loaded.project.ensure_group(&group_path)?;

        let mut linked = Vec::new();
        for path in paths {
            if let Some(name) = loaded.project.add_resource(path, &loaded.target, &group)? {
                linked.push(name);
            }
        }
        Ok((linked, created.then_some(group_path)))
    }

    fn unlink_entries(&mut self, paths: &[String]) -> Result<Vec<String>, PbxprojError> {
        let ProjectState::Loaded(loaded) = &mut self.state else {
            return Ok(Vec::new());
        };
        let mut unlinked = Vec::new();
        for path in paths {
            if let Some(name) = loaded.project.remove_resource(path, &loaded.target)? {
                unlinked.push(name);
            }
        }
        Ok(unlinked)
    }

    /// Declare added fonts and drop removed ones in `Info.plist`
    fn update_plist(&mut self, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        if self.fonts_added.is_empty() && self.fonts_removed.is_empty() {
            return Ok(());
        }
        let ProjectState::Loaded(loaded) = &self.state else {
            return Ok(());
        };
        let Some(setting) = loaded
            .project
            .target_build_setting(&loaded.target, INFO_PLIST_SETTING)
        else {
            self.warn(
                WarningKind::PlistMissing,
                format!(
                    "{} has no {}; fonts are not declared",
                    loaded.path.display(),
                    INFO_PLIST_SETTING
                ),
            );
            return Ok(());
        };

        let path = info_plist_path(&self.platform_root, &setting);
        let Some(text) = staged.read(&path)? else {
            self.warn(
                WarningKind::PlistMissing,
                format!("{} not found; fonts are not declared", path.display()),
            );
            return Ok(());
        };
        let mut plist = match parse_plist(&text) {
            Ok(plist) => plist,
            Err(err) => {
                self.warn(
                    WarningKind::NativeFileUnreadable,
                    format!("{}: {}", path.display(), err),
                );
                return Ok(());
            }
        };

        let changed = match self.platform {
            Platform::MacOs => !self.fonts_added.is_empty() && set_fonts_path(&mut plist),
            _ => {
                let gone: Vec<String> = self
                    .fonts_removed
                    .iter()
                    .filter(|name| !self.fonts_added.contains(name))
                    .cloned()
                    .collect();
                let removed = remove_app_fonts(&mut plist, &gone);
                let added =
                    !self.fonts_added.is_empty() && add_app_fonts(&mut plist, &self.fonts_added);
                removed || added
            }
        };
        if !changed {
            return Ok(());
        }

        match render_plist(&plist) {
            Ok(xml) => staged.write(&path, xml),
            Err(err) => {
                self.warn(
                    WarningKind::NativeFileUnreadable,
                    format!("{}: {}", path.display(), err),
                );
                Ok(())
            }
        }
    }
}

impl PlatformApplier for AppleApplier<'_> {
    fn clean(
        &mut self,
        class: AssetClass,
        entries: &[AssetEntry],
        staged: &mut StagedWrites<'_>,
    ) -> LinkResult<()> {
        let LinkPolicy::XcodeResource { add_font } = class.policy(self.platform) else {
            return Ok(());
        };
        self.load(staged)?;

        let paths: Vec<String> = entries.iter().map(|e| self.project_path(e)).collect();
        match self.unlink_entries(&paths) {
            Ok(names) => {
                if add_font {
                    self.fonts_removed.extend(names);
                }
            }
            Err(err) => self.abandon(err),
        }
        Ok(())
    }

    fn link(
        &mut self,
        class: AssetClass,
        entries: &[AssetEntry],
        staged: &mut StagedWrites<'_>,
    ) -> LinkResult<()> {
        let LinkPolicy::XcodeResource { add_font } = class.policy(self.platform) else {
            return Ok(());
        };
        self.load(staged)?;

        let paths: Vec<String> = entries.iter().map(|e| self.project_path(e)).collect();
        match self.link_entries(&paths) {
            Ok((names, created)) => {
                if let Some(group) = created {
                    self.sink.on_event(LinkEvent::GroupCreated {
                        platform: self.platform,
                        group,
                    });
                }
                if add_font {
                    self.fonts_added.extend(names);
                }
            }
            Err(err) => self.abandon(err),
        }
        Ok(())
    }

    fn finish(&mut self, staged: &mut StagedWrites<'_>) -> LinkResult<()> {
        self.update_plist(staged)?;
        if let ProjectState::Loaded(loaded) = &self.state {
            staged.write(&loaded.path, loaded.project.to_string())?;
        }
        Ok(())
    }
}

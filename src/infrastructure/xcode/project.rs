//! Xcode project graph editor
//!
//! Wraps a `project.pbxproj` document. Reads go through the parsed node tree;
//! every edit splices new text into the document and re-parses it, so the
//! rest of the file keeps its bytes.
//!
//! A linked resource is four records: a `PBXFileReference`, a group child
//! pointing at it, a `PBXBuildFile` pointing at it and an entry for that
//! build file in the target's `PBXResourcesBuildPhase`. `add_resource` and
//! `remove_resource` are the only operations that touch that linkage.

use std::fmt;
use std::ops::Range;

use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use super::pbxproj::{self, quote, Entry, Node, PbxprojError};
use crate::domain::value_objects::Platform;

/// 24-digit hexadecimal object identifier
pub type ObjectId = String;

const FILE_REFERENCE: &str = "PBXFileReference";
const BUILD_FILE: &str = "PBXBuildFile";
const GROUP: &str = "PBXGroup";
const VARIANT_GROUP: &str = "PBXVariantGroup";
const RESOURCES_PHASE: &str = "PBXResourcesBuildPhase";
const NATIVE_TARGET: &str = "PBXNativeTarget";

/// Group that receives linked resources
pub fn resource_group_path(flavor: Option<&str>) -> String {
    match flavor {
        Some(target) => format!("Clients/{}/Resources", target),
        None => "Resources".to_string(),
    }
}

/// `lastKnownFileType` for a resource extension
fn file_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image.png",
        "jpg" | "jpeg" => "image.jpeg",
        "gif" => "image.gif",
        "mp3" => "audio.mp3",
        "json" => "text.json",
        _ => "file",
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Editable `project.pbxproj`
#[derive(Debug, Clone)]
pub struct XcodeProject {
    text: String,
    root: Node,
}

impl XcodeProject {
    pub fn parse(text: impl Into<String>) -> Result<Self, PbxprojError> {
        let text = text.into();
        let root = pbxproj::parse(&text)?;
        Ok(Self { text, root })
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    fn objects(&self) -> Option<&IndexMap<String, Entry>> {
        self.root.get("objects")?.as_dict()
    }

    fn object(&self, id: &str) -> Option<&Node> {
        self.objects()?.get(id).map(|entry| &entry.node)
    }

    fn field<'a>(&'a self, id: &str, key: &str) -> Option<&'a str> {
        self.object(id)?.get(key)?.as_str()
    }

    fn isa(&self, id: &str) -> Option<&str> {
        self.field(id, "isa")
    }

    fn ids_with_isa<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.objects()
            .into_iter()
            .flat_map(|objects| objects.iter())
            .filter(move |(_, entry)| entry.node.get("isa").and_then(Node::as_str) == Some(isa))
            .map(|(id, _)| id.as_str())
    }

    fn project_object(&self) -> Result<&Node, PbxprojError> {
        let id = self
            .root
            .get("rootObject")
            .and_then(Node::as_str)
            .ok_or_else(|| PbxprojError::Missing("rootObject".to_string()))?;
        self.object(id)
            .ok_or_else(|| PbxprojError::Missing(format!("project object {}", id)))
    }

    /// Targets in project order
    pub fn targets(&self) -> Vec<ObjectId> {
        self.project_object()
            .map(|project| project.strings("targets"))
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn first_target(&self) -> Option<ObjectId> {
        self.targets().into_iter().next()
    }

    /// Native target whose name matches, ignoring quoting
    pub fn find_target(&self, name: &str) -> Option<ObjectId> {
        self.targets()
            .into_iter()
            .find(|id| self.isa(id) == Some(NATIVE_TARGET) && self.field(id, "name") == Some(name))
    }

    fn first_build_settings(&self, target: &str) -> Option<&Node> {
        let list = self.field(target, "buildConfigurationList")?;
        let config = self.object(list)?.strings("buildConfigurations").first()?.to_string();
        self.object(&config)?.get("buildSettings")
    }

    fn targets_macos(&self, target: &str) -> bool {
        self.first_build_settings(target).is_some_and(|settings| {
            settings.get("SDKROOT").and_then(Node::as_str) == Some("macosx")
                || settings.get("MACOSX_DEPLOYMENT_TARGET").is_some()
        })
    }

    /// Target used for a platform: with several targets, macOS picks the one
    /// building for macOS and iOS skips those
    pub fn platform_target(&self, platform: Platform) -> Option<ObjectId> {
        let targets = self.targets();
        if targets.len() <= 1 {
            return targets.into_iter().next();
        }
        let want_macos = platform == Platform::MacOs;
        targets
            .into_iter()
            .find(|id| self.targets_macos(id) == want_macos)
    }

    /// Build setting from the first configuration of the platform's target
    pub fn build_setting(&self, key: &str, platform: Platform) -> Option<String> {
        let target = self.platform_target(platform)?;
        self.target_build_setting(&target, key)
    }

    /// Build setting from the first configuration of `target`
    pub fn target_build_setting(&self, target: &str, key: &str) -> Option<String> {
        self.first_build_settings(target)?
            .get(key)?
            .as_str()
            .map(str::to_string)
    }

    fn main_group(&self) -> Result<ObjectId, PbxprojError> {
        self.project_object()?
            .get("mainGroup")
            .and_then(Node::as_str)
            .map(str::to_string)
            .ok_or_else(|| PbxprojError::Missing("mainGroup".to_string()))
    }

    fn child_group(&self, parent: &str, name: &str) -> Option<ObjectId> {
        let children = self.object(parent)?.get("children")?.as_array()?;
        children.iter().find_map(|item| {
            let id = item.node.as_str()?;
            if !matches!(self.isa(id), Some(GROUP) | Some(VARIANT_GROUP)) {
                return None;
            }
            let label = self
                .field(id, "name")
                .or_else(|| self.field(id, "path"))
                .or(item.node.comment.as_deref());
            (label == Some(name)).then(|| id.to_string())
        })
    }

    fn file_references(&self, path: &str) -> Vec<ObjectId> {
        self.ids_with_isa(FILE_REFERENCE)
            .filter(|id| self.field(id, "path") == Some(path))
            .map(str::to_string)
            .collect()
    }

    fn build_files_for(&self, file_ref: &str) -> Vec<ObjectId> {
        self.ids_with_isa(BUILD_FILE)
            .filter(|id| self.field(id, "fileRef") == Some(file_ref))
            .map(str::to_string)
            .collect()
    }

    /// Objects of `isa` whose array `key` contains `member`
    fn containers_of(&self, isa: &str, key: &str, member: &str) -> Vec<ObjectId> {
        self.ids_with_isa(isa)
            .filter(|id| {
                self.object(id)
                    .is_some_and(|node| node.strings(key).contains(&member))
            })
            .map(str::to_string)
            .collect()
    }

    fn resources_phase(&self, target: &str) -> Option<ObjectId> {
        self.object(target)?
            .strings("buildPhases")
            .into_iter()
            .find(|id| self.isa(id) == Some(RESOURCES_PHASE))
            .map(str::to_string)
    }

    fn is_linked(&self, file_ref: &str, target: &str) -> bool {
        let grouped = !self.containers_of(GROUP, "children", file_ref).is_empty()
            || !self.containers_of(VARIANT_GROUP, "children", file_ref).is_empty();
        let Some(phase) = self.resources_phase(target) else {
            return false;
        };
        let phase_files = self
            .object(&phase)
            .map(|node| node.strings("files"))
            .unwrap_or_default();
        grouped
            && self
                .build_files_for(file_ref)
                .iter()
                .any(|build| phase_files.contains(&build.as_str()))
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Walk `path` from the main group, creating missing groups.
    /// Returns the innermost group and whether anything was created.
    pub fn ensure_group(&mut self, path: &str) -> Result<(ObjectId, bool), PbxprojError> {
        let mut group = self.main_group()?;
        let mut created = false;

        for name in path.split('/').filter(|s| !s.is_empty()) {
            if let Some(child) = self.child_group(&group, name) {
                group = child;
                continue;
            }
            let id = self.generate_id(GROUP, &format!("{}/{}", group, name));
            self.insert_object(
                GROUP,
                format!(
                    "\t\t{id} /* {name} */ = {{\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t);\n\t\t\tname = {quoted};\n\t\t\tsourceTree = \"<group>\";\n\t\t}};\n",
                    id = id,
                    name = name,
                    quoted = quote(name),
                ),
            )?;
            self.push_item(&group, "children", &format!("{} /* {} */", id, name))?;
            group = id;
            created = true;
        }

        Ok((group, created))
    }

    /// Link a resource to `target` inside `group`.
    ///
    /// Returns the reference's basename, or `None` when the path was already
    /// fully linked. Partial leftovers from earlier runs are removed first.
    pub fn add_resource(
        &mut self,
        relative_path: &str,
        target: &str,
        group: &str,
    ) -> Result<Option<String>, PbxprojError> {
        let existing = self.file_references(relative_path);
        if existing.iter().any(|id| self.is_linked(id, target)) {
            return Ok(None);
        }
        for file_ref in existing {
            self.unlink_reference(&file_ref)?;
        }

        let name = basename(relative_path).to_string();
        let ref_id = self.generate_id(FILE_REFERENCE, relative_path);
        self.insert_object(
            FILE_REFERENCE,
            format!(
                "\t\t{} /* {} */ = {{isa = PBXFileReference; lastKnownFileType = {}; name = {}; path = {}; sourceTree = \"<group>\"; }};\n",
                ref_id,
                name,
                file_type(&name),
                quote(&name),
                quote(relative_path),
            ),
        )?;

        let build_id = self.generate_id(BUILD_FILE, &format!("{}:{}", target, relative_path));
        self.insert_object(
            BUILD_FILE,
            format!(
                "\t\t{} /* {} in Resources */ = {{isa = PBXBuildFile; fileRef = {} /* {} */; }};\n",
                build_id, name, ref_id, name
            ),
        )?;

        self.push_item(group, "children", &format!("{} /* {} */", ref_id, name))?;
        let phase = self.ensure_resources_phase(target)?;
        self.push_item(
            &phase,
            "files",
            &format!("{} /* {} in Resources */", build_id, name),
        )?;

        Ok(Some(name))
    }

    /// Unlink a resource from `target`. The file reference and its group
    /// entry go too unless another target still builds it.
    ///
    /// Returns the basename, or `None` when nothing was linked.
    pub fn remove_resource(
        &mut self,
        relative_path: &str,
        target: &str,
    ) -> Result<Option<String>, PbxprojError> {
        let refs = self.file_references(relative_path);
        if refs.is_empty() {
            return Ok(None);
        }

        let phase = self.resources_phase(target);
        let mut unlinked = false;
        for file_ref in &refs {
            for build in self.build_files_for(file_ref) {
                let in_target = phase.as_deref().is_some_and(|phase| {
                    self.object(phase)
                        .is_some_and(|node| node.strings("files").contains(&build.as_str()))
                });
                if in_target {
                    self.remove_build_file(&build)?;
                    unlinked = true;
                }
            }
            if self.build_files_for(file_ref).is_empty() {
                for group in self.reference_groups(file_ref) {
                    self.remove_item(&group, "children", file_ref)?;
                }
                self.remove_object(file_ref)?;
            }
        }

        Ok(unlinked.then(|| basename(relative_path).to_string()))
    }

    fn reference_groups(&self, file_ref: &str) -> Vec<ObjectId> {
        let mut groups = self.containers_of(GROUP, "children", file_ref);
        groups.extend(self.containers_of(VARIANT_GROUP, "children", file_ref));
        groups
    }

    fn remove_build_file(&mut self, build: &str) -> Result<(), PbxprojError> {
        for phase in self.containers_of(RESOURCES_PHASE, "files", build) {
            self.remove_item(&phase, "files", build)?;
        }
        self.remove_object(build)
    }

    /// Remove every trace of a file reference
    fn unlink_reference(&mut self, file_ref: &str) -> Result<(), PbxprojError> {
        for build in self.build_files_for(file_ref) {
            self.remove_build_file(&build)?;
        }
        for group in self.reference_groups(file_ref) {
            self.remove_item(&group, "children", file_ref)?;
        }
        self.remove_object(file_ref)
    }

    fn ensure_resources_phase(&mut self, target: &str) -> Result<ObjectId, PbxprojError> {
        if let Some(phase) = self.resources_phase(target) {
            return Ok(phase);
        }
        if self.object(target).is_none() {
            return Err(PbxprojError::Missing(format!("target {}", target)));
        }
        let id = self.generate_id(RESOURCES_PHASE, target);
        self.insert_object(
            RESOURCES_PHASE,
            format!(
                "\t\t{} /* Resources */ = {{\n\t\t\tisa = PBXResourcesBuildPhase;\n\t\t\tbuildActionMask = 2147483647;\n\t\t\tfiles = (\n\t\t\t);\n\t\t\trunOnlyForDeploymentPostprocessing = 0;\n\t\t}};\n",
                id
            ),
        )?;
        self.push_item(target, "buildPhases", &format!("{} /* Resources */", id))?;
        Ok(id)
    }

    /// Deterministic id derived from `seed`, skipping ids already in use
    fn generate_id(&self, kind: &str, seed: &str) -> ObjectId {
        let mut counter: u64 = 0;
        loop {
            let digest = Sha256::new()
                .chain_update(kind.as_bytes())
                .chain_update([0u8])
                .chain_update(seed.as_bytes())
                .chain_update(counter.to_le_bytes())
                .finalize();
            let id: String = digest[..12].iter().map(|b| format!("{:02X}", b)).collect();
            if !self.text.contains(&id) {
                return id;
            }
            counter += 1;
        }
    }

    // ------------------------------------------------------------------
    // Text splicing
    // ------------------------------------------------------------------

    fn splice(&mut self, range: Range<usize>, replacement: &str) -> Result<(), PbxprojError> {
        let mut text = self.text.clone();
        text.replace_range(range, replacement);
        self.root = pbxproj::parse(&text)?;
        self.text = text;
        Ok(())
    }

    /// Remove `range`; when it is alone on its lines the lines go with it
    fn remove_range(&mut self, range: Range<usize>) -> Result<(), PbxprojError> {
        let line_start = self.text[..range.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.text[range.end..]
            .find('\n')
            .map_or(self.text.len(), |i| range.end + i + 1);
        let alone = self.text[line_start..range.start].trim().is_empty()
            && self.text[range.end..line_end].trim().is_empty();
        if alone {
            return self.splice(line_start..line_end, "");
        }
        let trailing = self.text[range.end..]
            .bytes()
            .take_while(|b| *b == b' ')
            .count();
        self.splice(range.start..range.end + trailing, "")
    }

    fn remove_object(&mut self, id: &str) -> Result<(), PbxprojError> {
        let extent = self
            .objects()
            .and_then(|objects| objects.get(id))
            .map(|entry| entry.extent.clone());
        match extent {
            Some(extent) => self.remove_range(extent),
            None => Ok(()),
        }
    }

    fn remove_item(&mut self, id: &str, key: &str, member: &str) -> Result<(), PbxprojError> {
        let extent = self
            .object(id)
            .and_then(|node| node.get(key))
            .and_then(Node::as_array)
            .and_then(|items| items.iter().find(|i| i.node.as_str() == Some(member)))
            .map(|item| item.extent.clone());
        match extent {
            Some(extent) => self.remove_range(extent),
            None => Ok(()),
        }
    }

    /// Append `item` to the array `key` of object `id`, following the
    /// array's own layout
    fn push_item(&mut self, id: &str, key: &str, item: &str) -> Result<(), PbxprojError> {
        let missing = || PbxprojError::MissingArray {
            id: id.to_string(),
            key: key.to_string(),
        };
        let node = self.object(id).and_then(|n| n.get(key)).ok_or_else(missing)?;
        let items = node.as_array().ok_or_else(missing)?;
        let close = node.span.end - 1;
        let close_line = self.text[..close].rfind('\n').map_or(0, |i| i + 1);

        if self.text[close_line..close].trim().is_empty() {
            let indent = match items.last() {
                Some(last) => {
                    let line = self.text[..last.extent.start].rfind('\n').map_or(0, |i| i + 1);
                    self.text[line..last.extent.start].to_string()
                }
                None => format!("{}\t", &self.text[close_line..close]),
            };
            return self.splice(close_line..close_line, &format!("{}{},\n", indent, item));
        }

        match items.last() {
            Some(last) if !self.text[last.extent.clone()].ends_with(',') => {
                let at = last.extent.end;
                self.splice(at..at, &format!(", {}", item))
            }
            _ => self.splice(close..close, &format!("{}, ", item)),
        }
    }

    /// Insert an object entry at the end of its `isa` section, creating the
    /// section in alphabetical order when the project has none
    fn insert_object(&mut self, isa: &str, entry: String) -> Result<(), PbxprojError> {
        let end_marker = format!("/* End {} section */", isa);
        if let Some(at) = self.text.find(&end_marker) {
            let line = self.text[..at].rfind('\n').map_or(0, |i| i + 1);
            return self.splice(line..line, &entry);
        }

        let objects_close = self
            .root
            .get("objects")
            .filter(|node| node.as_dict().is_some())
            .map(|node| node.span.end - 1)
            .ok_or_else(|| PbxprojError::Missing("objects".to_string()))?;
        let close_line = self.text[..objects_close].rfind('\n').map_or(0, |i| i + 1);

        let sections = section_starts(&self.text);
        if sections.is_empty() {
            return self.splice(close_line..close_line, &entry);
        }
        let later = sections
            .iter()
            .find(|(_, name)| *name > isa)
            .map(|(at, _)| *at);

        let section = format!(
            "/* Begin {isa} section */\n{entry}/* End {isa} section */\n",
            isa = isa,
            entry = entry
        );
        match later {
            Some(at) => self.splice(at..at, &format!("{}\n", section)),
            None => self.splice(close_line..close_line, &format!("\n{}", section)),
        }
    }
}

/// Offsets and names of `/* Begin <isa> section */` markers
fn section_starts(text: &str) -> Vec<(usize, &str)> {
    const BEGIN: &str = "/* Begin ";
    const END: &str = " section */";
    text.match_indices(BEGIN)
        .filter_map(|(at, _)| {
            let rest = &text[at + BEGIN.len()..];
            let len = rest.find(END)?;
            let name = &rest[..len];
            name.bytes()
                .all(|b| b.is_ascii_alphanumeric())
                .then_some((at, name))
        })
        .collect()
}

impl fmt::Display for XcodeProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

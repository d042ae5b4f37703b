//! Xcode project fixtures shared by tests

use std::fs;
use std::path::Path;

pub const PROJECT: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 46;
	objects = {

/* Begin PBXGroup section */
		83CBB9F61A601CBA00E9B192 = {
			isa = PBXGroup;
			children = (
				13B07FAE1A68108700A75B9A /* App */,
			);
			sourceTree = "<group>";
		};
		13B07FAE1A68108700A75B9A /* App */ = {
			isa = PBXGroup;
			children = (
			);
			name = App;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		13B07F861A680F5B00A75B9A /* App */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 13B07F931A680F5B00A75B9A /* Build configuration list for PBXNativeTarget "App" */;
			buildPhases = (
				13B07F8E1A680F5B00A75B9A /* Resources */,
			);
			name = App;
			productName = App;
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		83CBB9F71A601CBA00E9B192 /* Project object */ = {
			isa = PBXProject;
			mainGroup = 83CBB9F61A601CBA00E9B192;
			targets = (
				13B07F861A680F5B00A75B9A /* App */,
			);
		};
/* End PBXProject section */

/* Begin PBXResourcesBuildPhase section */
		13B07F8E1A680F5B00A75B9A /* Resources */ = {
			isa = PBXResourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXResourcesBuildPhase section */

/* Begin XCBuildConfiguration section */
		13B07F941A680F5B00A75B9A /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				INFOPLIST_FILE = App/Info.plist;
				PRODUCT_NAME = App;
			};
			name = Debug;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		13B07F931A680F5B00A75B9A /* Build configuration list for PBXNativeTarget "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				13B07F941A680F5B00A75B9A /* Debug */,
			);
		};
/* End XCConfigurationList section */
	};
	rootObject = 83CBB9F71A601CBA00E9B192 /* Project object */;
}
"#;

pub const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>App</string>
</dict>
</plist>
"#;

/// Write `App.xcodeproj` and `App/Info.plist` under a platform directory
pub fn write_app(platform_root: &Path) {
    fs::create_dir_all(platform_root.join("App.xcodeproj")).unwrap();
    fs::create_dir_all(platform_root.join("App")).unwrap();
    fs::write(platform_root.join("App.xcodeproj/project.pbxproj"), PROJECT).unwrap();
    fs::write(platform_root.join("App/Info.plist"), INFO_PLIST).unwrap();
}

//! Test fixtures - native project templates and synthesized fonts.

/// React Native `MainApplication` before any font registration
pub const MAIN_APPLICATION_JAVA: &str = "package com.example;

import android.app.Application;
import com.facebook.react.ReactApplication;

public class MainApplication extends Application implements ReactApplication {
  @Override
  public void onCreate() {
    super.onCreate();
    SoLoader.init(this, false);
  }
}
";

/// Relative location of `MainApplication.java`
pub const MAIN_APPLICATION_PATH: &str =
    "android/app/src/main/java/com/example/MainApplication.java";

/// Xcode project with one `App` target and an empty Resources phase
pub const PROJECT_PBXPROJ: &str = r#"// !$*UTF8*$!
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

/// `Info.plist` referenced by `INFOPLIST_FILE`
pub const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>App</string>
</dict>
</plist>
"#;

/// Synthesize a minimal TrueType font carrying a family name, weight class
/// and italic bit
pub fn font(family: &str, weight: u16, italic: bool) -> Vec<u8> {
    let mut tables: Vec<([u8; 4], Vec<u8>)> = Vec::new();

    let mut head = vec![0u8; 54];
    if italic {
        head[44..46].copy_from_slice(&2u16.to_be_bytes());
    }
    tables.push((*b"head", head));

    let encoded: Vec<u8> = family
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    let mut name = Vec::new();
    for field in [0u16, 1, 18, 3, 1, 0x0409, 1, encoded.len() as u16, 0] {
        name.extend_from_slice(&field.to_be_bytes());
    }
    name.extend_from_slice(&encoded);
    tables.push((*b"name", name));

    let mut os2 = vec![0u8; 96];
    os2[4..6].copy_from_slice(&weight.to_be_bytes());
    if italic {
        os2[62..64].copy_from_slice(&1u16.to_be_bytes());
    }
    tables.push((*b"OS/2", os2));

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&[0u8; 6]);
    let mut offset = 12 + 16 * tables.len();
    let mut bodies = Vec::new();
    for (tag, body) in &tables {
        out.extend_from_slice(tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bodies.extend_from_slice(body);
        offset += body.len();
    }
    out.extend_from_slice(&bodies);
    out
}

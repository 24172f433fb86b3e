//! Menu text in the supported languages
//!
//! Vietnamese strings are written without diacritics so they render on any
//! terminal code page.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Language of the interactive menu
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[serde(alias = "en")]
    #[value(name = "en", alias = "english")]
    English,
    #[serde(alias = "vi")]
    #[value(name = "vi", alias = "vietnamese")]
    Vietnamese,
}

impl Locale {
    /// Title line of the banner
    pub const fn banner_title(self) -> &'static str {
        match self {
            Self::English => " Testlib Generator Builder (pybind11) - English UI",
            Self::Vietnamese => " Testlib Generator Builder (pybind11)",
        }
    }

    /// Banner line naming the host OS
    pub fn operating_system(self, os: &str) -> String {
        match self {
            Self::English => format!("Operating system: {os}"),
            Self::Vietnamese => format!("He dieu hanh: {os}"),
        }
    }

    /// Banner line for one scanned generator directory
    pub fn scanning(self, dir: impl Display) -> String {
        match self {
            Self::English => format!("Scanning: {dir}"),
            Self::Vietnamese => format!("Thu muc: {dir}"),
        }
    }

    /// Banner line with the number of detected modules
    pub fn detected(self, count: usize) -> String {
        match self {
            Self::English => format!("Detected {count} pybind11 module(s).\n"),
            Self::Vietnamese => format!("Tim thay {count} module(s) pybind11.\n"),
        }
    }

    /// Main menu: header line followed by the four options
    pub const fn main_options(self) -> [&'static str; 5] {
        match self {
            Self::English => [
                "Options:",
                " 1. Build all modules",
                " 2. Pick modules to build",
                " 3. List modules",
                " 0. Exit\n",
            ],
            Self::Vietnamese => [
                "Tuy chon:",
                " 1. Build tat ca module",
                " 2. Chon module de build",
                " 3. Liet ke module hien co",
                " 0. Thoat\n",
            ],
        }
    }

    /// Prompt for the main menu choice
    pub const fn main_prompt(self) -> &'static str {
        match self {
            Self::English => "Enter your choice: ",
            Self::Vietnamese => "Nhap lua chon: ",
        }
    }

    /// Printed when the user exits
    pub const fn goodbye(self) -> &'static str {
        match self {
            Self::English => "Goodbye!",
            Self::Vietnamese => "Tam biet!",
        }
    }

    /// Reply to an unknown main menu choice
    pub const fn invalid_choice(self) -> &'static str {
        match self {
            Self::English => "Invalid choice.\n",
            Self::Vietnamese => "Lua chon khong hop le.\n",
        }
    }

    /// Hint shown when there is nothing to pick from
    pub const fn no_generators(self) -> &'static str {
        match self {
            Self::English => "No pybind11 generators detected. Convert your C++ files first.",
            Self::Vietnamese => "Chua co generator nao dung pybind11. Hay chuyen doi truoc.",
        }
    }

    /// Trailing lines of the module list
    pub const fn picker_options(self) -> [&'static str; 2] {
        match self {
            Self::English => [" a. Build all", " q. Back\n"],
            Self::Vietnamese => [" a. Build tat ca", " q. Quay lai\n"],
        }
    }

    /// Prompt for the module selection
    pub const fn picker_prompt(self) -> &'static str {
        match self {
            Self::English => "Select modules (e.g. 1 3 5, or 'a'): ",
            Self::Vietnamese => "Chon module (vi du: 1 3 5, hoac 'a'): ",
        }
    }

    /// Warning for a selection token that is not a number
    pub fn invalid_token(self, token: &str) -> String {
        match self {
            Self::English => format!("Ignoring invalid entry: {token}"),
            Self::Vietnamese => format!("Bo qua lua chon khong hop le: {token}"),
        }
    }

    /// Warning for an index outside the list
    pub fn out_of_range(self, token: &str) -> String {
        match self {
            Self::English => format!("Ignoring out-of-range index: {token}"),
            Self::Vietnamese => format!("Bo qua chi muc ngoai pham vi: {token}"),
        }
    }

    /// Pause after listing modules
    pub const fn back_to_main_menu(self) -> &'static str {
        match self {
            Self::English => "\nPress Enter to return to the main menu...",
            Self::Vietnamese => "\nNhan Enter de quay lai menu chinh...",
        }
    }

    /// Pause after a build
    pub const fn back_to_menu(self) -> &'static str {
        match self {
            Self::English => "Press Enter to return to the menu...",
            Self::Vietnamese => "Nhan Enter de quay lai menu...",
        }
    }

    /// Reply to an empty selection
    pub const fn none_selected(self) -> &'static str {
        match self {
            Self::English => "No modules selected.\n",
            Self::Vietnamese => "Khong co module nao duoc chon.\n",
        }
    }

    /// Reply when a batch has no targets
    pub const fn nothing_to_build(self) -> &'static str {
        match self {
            Self::English => "No modules selected for build.",
            Self::Vietnamese => "Khong co module nao de build.",
        }
    }

    /// Header of the build summary
    pub const fn starting_build(self) -> &'static str {
        match self {
            Self::English => "\nStarting build:",
            Self::Vietnamese => "\nBat dau build:",
        }
    }

    /// Report of a failed build
    pub fn build_failed(self, error: impl Display) -> String {
        match self {
            Self::English => format!("\nBuild failed: {error}\n"),
            Self::Vietnamese => format!("\nBuild that bai: {error}\n"),
        }
    }

    /// Warning for a module that produced no shared library
    pub fn missing_artifact(self, module: &str) -> String {
        match self {
            Self::English => format!("Warning: no shared library was produced for {module}"),
            Self::Vietnamese => format!("Canh bao: khong tim thay thu vien da build cho {module}"),
        }
    }

    /// Report of a finished build
    pub fn build_complete(self, output_dir: impl Display) -> String {
        match self {
            Self::English => {
                format!("\nBuild complete. Shared libraries copied to: {output_dir}\n")
            }
            Self::Vietnamese => {
                format!("\nBuild hoan tat. File .so/.pyd nam trong thu muc: {output_dir}\n")
            }
        }
    }
}

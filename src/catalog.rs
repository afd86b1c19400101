//! The fixed list of everything a run provisions, in order.

use crate::constants::packages::{APT_BASIC, APT_GUI, DEFAULT_PIP_PACKAGES, PIP2_PACKAGES};
use crate::constants::urls;
use crate::core::types::{DownloadTarget, GitTarget, ScriptTarget, Section, Target};
use crate::utils::paths::HomePaths;

/// `pip2` when it is on `PATH`, plain `pip` otherwise.
pub fn resolve_pip2() -> String {
    if which::which("pip2").is_ok() {
        "pip2".to_string()
    } else {
        "pip".to_string()
    }
}

pub fn plan(paths: &HomePaths, gui: bool, pip2: &str) -> Vec<Section> {
    let mut sections = vec![Section::new(
        "aptitude basic",
        APT_BASIC.iter().map(|p| Target::apt(p)).collect(),
    )];

    if gui {
        sections.push(Section::new(
            "aptitude GUI",
            APT_GUI.iter().map(|p| Target::apt(p)).collect(),
        ));
    }

    sections.push(Section::new(
        "python2 packages",
        PIP2_PACKAGES.iter().map(|p| Target::pip(pip2, p)).collect(),
    ));
    sections.push(Section::new(
        "python (default interpreter) packages",
        DEFAULT_PIP_PACKAGES
            .iter()
            .map(|p| Target::pip("pip", p))
            .collect(),
    ));
    sections.push(Section::new("vim", vim_targets(paths)));
    sections.push(Section::new("zsh", zsh_targets(paths)));

    sections
}

fn vim_targets(paths: &HomePaths) -> Vec<Target> {
    let bundle = paths.vim_dir("bundle");

    vec![
        Target::Download(DownloadTarget {
            name: "pathogen".to_string(),
            url: urls::PATHOGEN_URL.to_string(),
            destination: paths.vim_dir("autoload/pathogen.vim"),
            setup_dirs: vec![paths.vim_dir("autoload"), bundle.clone()],
        }),
        Target::Git(
            GitTarget::new("syntastic", urls::SYNTASTIC_REPO, bundle.join("syntastic"))
                .flag("--depth=1"),
        ),
        Target::Git(
            GitTarget::new("jedi-vim", urls::JEDI_VIM_REPO, bundle.join("jedi-vim"))
                .flag("--recursive"),
        ),
        Target::Download(DownloadTarget {
            name: "monokai".to_string(),
            url: urls::MONOKAI_URL.to_string(),
            destination: paths.vim_dir("colors/monokai.vim"),
            setup_dirs: vec![paths.vim_dir("colors")],
        }),
    ]
}

fn zsh_targets(paths: &HomePaths) -> Vec<Target> {
    let plugins = paths.zsh_custom_dir("plugins");
    let themes = paths.zsh_custom_dir("themes");

    vec![
        Target::Script(ScriptTarget {
            name: "oh-my-zsh".to_string(),
            script_url: urls::OH_MY_ZSH_INSTALLER.to_string(),
            marker: paths.oh_my_zsh_dir(),
        }),
        Target::Git(GitTarget::new("k", urls::K_REPO, plugins.join("k"))),
        Target::Git(GitTarget::new(
            "syntax highlight",
            urls::SYNTAX_HIGHLIGHTING_REPO,
            plugins.join("zsh-syntax-highlighting"),
        )),
        Target::Git(GitTarget::new(
            "autosuggestions",
            urls::AUTOSUGGESTIONS_REPO,
            plugins.join("zsh-autosuggestions"),
        )),
        Target::Git(GitTarget::new(
            "directory history",
            urls::DIRECTORY_HISTORY_REPO,
            plugins.join("zsh-directory-history"),
        )),
        Target::Git(GitTarget::new(
            "powerlevel9k",
            urls::POWERLEVEL9K_REPO,
            themes.join("powerlevel9k"),
        )),
    ]
}

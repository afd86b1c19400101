//! Remote endpoints contacted during provisioning.

pub const PATHOGEN_URL: &str = "https://tpo.pe/pathogen.vim";
pub const MONOKAI_URL: &str =
    "https://raw.githubusercontent.com/sickill/vim-monokai/master/colors/monokai.vim";

pub const SYNTASTIC_REPO: &str = "https://github.com/vim-syntastic/syntastic.git";
pub const JEDI_VIM_REPO: &str = "https://github.com/davidhalter/jedi-vim.git";

pub const OH_MY_ZSH_INSTALLER: &str =
    "https://raw.github.com/robbyrussell/oh-my-zsh/master/tools/install.sh";

pub const K_REPO: &str = "https://github.com/supercrabtree/k";
pub const SYNTAX_HIGHLIGHTING_REPO: &str = "https://github.com/zsh-users/zsh-syntax-highlighting.git";
pub const AUTOSUGGESTIONS_REPO: &str = "https://github.com/zsh-users/zsh-autosuggestions";
pub const DIRECTORY_HISTORY_REPO: &str = "https://github.com/tymm/zsh-directory-history";
pub const POWERLEVEL9K_REPO: &str = "https://github.com/bhilburn/powerlevel9k.git";

//! Built-in Tera templates for scaffolded starter files.

/// Default README template. Can be replaced via `scaffold.readme_template`.
pub const README: &str = r#"# {{ name }}

{% if description %}{{ description }}

{% endif %}- **Profile:** {{ profile }}
- **Python:** {{ python_version }} ({{ env_backend }})
{% if author %}- **Author:** {{ author }}
{% endif %}{% if license %}- **License:** {{ license }}
{% endif %}
## Getting started

{% if env_backend == "venv" %}```sh
python3 -m venv {{ env_path }}
source {{ env_path }}/bin/activate
pip install -r requirements.txt
```
{% elif env_backend == "conda" %}```sh
conda env create --file environment.yml --prefix {{ env_path }}
conda activate ./{{ env_path }}
```
{% else %}Bring your own environment; nothing here assumes one.
{% endif %}
## Layout

Raw inputs go to `data/raw` and are treated as read-only. Notebooks live
in `notebooks`, importable code in `src/{{ package }}`. Run
`dsman profiles` for the full directory reference.
"#;

/// Default `.gitignore` for project repositories.
pub const GITIGNORE: &str = r#"# Byte-compiled / caches
__pycache__/
*.py[cod]
.ipynb_checkpoints/

# Environments
{% if env_path %}{{ env_path }}/
{% endif %}.env

# OS cruft
.DS_Store
"#;

/// Starter `requirements.txt`.
pub const REQUIREMENTS: &str = r#"# Project dependencies. Pin versions before sharing results.
jupyter
pandas
"#;

/// Starter `Makefile` with environment and notebook shortcuts.
pub const MAKEFILE: &str = r#".PHONY: env lab clean

{% if env_backend == "conda" %}env: ## create the conda environment
	conda env create --file environment.yml --prefix {{ env_path }}
{% elif env_backend == "venv" %}env: ## create the virtual environment
	python3 -m venv {{ env_path }}
	{{ env_path }}/bin/pip install -r requirements.txt
{% else %}env: ## environment management is disabled for this project
	@echo "no managed environment"
{% endif %}
lab: ## start jupyter lab
	jupyter lab

clean: ## remove caches
	find . -type d -name __pycache__ -exec rm -rf {} +
	find . -type d -name .ipynb_checkpoints -exec rm -rf {} +
"#;

/// Conda environment spec, written when the backend is conda.
pub const ENVIRONMENT_YML: &str = r#"name: {{ name }}
channels:
  - conda-forge
dependencies:
  - python={{ python_version }}
  - jupyter
  - pandas
  - pip
"#;

/// Package marker for `src/<package>/__init__.py`.
pub const INIT_PY: &str = r#""""Top-level package for {{ name }}."""
"#;

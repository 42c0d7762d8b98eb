use fingerprint_core::{RubySettings, RuntimeDecision};

/// Generates a Dockerfile for a Ruby app on the App Engine Ruby base image.
pub struct DockerfileGenerator<'a> {
    settings: &'a RubySettings,
    decision: &'a RuntimeDecision,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(settings: &'a RubySettings, decision: &'a RuntimeDecision) -> Self {
        Self { settings, decision }
    }

    pub fn render(&self) -> String {
        let sections = [
            self.header(),
            self.interpreter(),
            self.packages(),
            gem_install(),
            self.entrypoint(),
        ];
        sections.join("\n")
    }

    fn header(&self) -> String {
        format!(
            r#"# This Dockerfile for a Ruby application was generated by fingerprint.

# The base Dockerfile installs:
# * A number of packages needed by the Ruby runtime and by gems
#   commonly used in Ruby web apps (such as libsqlite3)
# * A recent version of NodeJS
# * A recent version of the standard Ruby runtime to use by default
# * The bundler and foreman gems
FROM {base}
"#,
            base = self.settings.base_image,
        )
    }

    fn interpreter(&self) -> String {
        let Some(version) = self.decision.ruby_version.as_deref() else {
            return r#"# This Dockerfile uses the default Ruby interpreter installed and
# specified by the base image.
# If you want to use a specific ruby interpreter, provide a
# .ruby-version file, then delete this Dockerfile and re-run
# "fingerprint gen-config --custom" to recreate it.
"#
            .to_owned();
        };

        format!(
            r#"# Install ruby {version} if not already preinstalled by the base image
RUN cd /rbenv/plugins/ruby-build && \
    git pull && \
    rbenv install -s {version} && \
    rbenv global {version} && \
    gem install -q --no-rdoc --no-ri bundler --version {bundler} && \
    gem install -q --no-rdoc --no-ri foreman --version {foreman}
ENV RBENV_VERSION {version}
"#,
            bundler = self.settings.bundler_version,
            foreman = self.settings.foreman_version,
        )
    }

    fn packages(&self) -> String {
        if self.decision.packages.is_empty() {
            return r#"# To install additional packages needed by your gems, uncomment
# the "RUN apt-get update" and "RUN apt-get install" lines below
# and specify your packages.
# RUN apt-get update
# RUN apt-get install -y -q (your packages here)
"#
            .to_owned();
        }

        format!(
            r#"# Install additional package dependencies needed by installed gems.
# Feel free to add any more needed by your gems.
RUN apt-get update -y && \
    apt-get install -y -q --no-install-recommends \
        {packages} \
    && apt-get clean && rm /var/lib/apt/lists/*_*
"#,
            packages = self.decision.packages_line(),
        )
    }

    fn entrypoint(&self) -> String {
        format!(
            r#"# Start application on port 8080.
COPY . /app/
ENTRYPOINT {entrypoint}
"#,
            entrypoint = self.decision.entrypoint,
        )
    }
}

fn gem_install() -> String {
    r#"# Install required gems.
COPY Gemfile Gemfile.lock /app/
RUN bundle install --deployment && rbenv rehash
"#
    .to_owned()
}

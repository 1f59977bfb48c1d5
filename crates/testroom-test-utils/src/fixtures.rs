//! Sample config documents shaped like freshly scaffolded projects.

/// Checkly config with nested `browserChecks` inside `checks`.
pub const CHECKLY_CONFIG: &str = r#"import { defineConfig } from 'checkly'
import { Frequency } from 'checkly/constructs'

export default defineConfig({
  projectName: 'Storefront',
  logicalId: 'storefront-monitoring',
  repoUrl: 'https://github.com/acme/storefront',
  checks: {
    activated: true,
    muted: false,
    runtimeId: '2024.02',
    frequency: Frequency.EVERY_10M,
    locations: ['us-east-1', 'eu-west-1'],
    tags: ['website', 'api'],
    checkMatch: '**/__checks__/**/*.check.ts',
    ignoreDirectoriesMatch: [],
    browserChecks: {
      frequency: Frequency.EVERY_10M,
      testMatch: '**/__checks__/**/*.spec.ts',
    },
  },
  cli: {
    runLocation: 'eu-west-1',
  },
})
"#;

/// Minimal Checkly config with an inline `checks` object.
pub const CHECKLY_INLINE: &str = r#"export default defineConfig({
  checkMatch: '**/*.check.ts',
  testMatch: '**/*.spec.ts',
  checks: { activated: true },
})
"#;

/// Playwright config.
pub const PLAYWRIGHT_CONFIG: &str = r#"import { defineConfig, devices } from '@playwright/test'

export default defineConfig({
  testDir: './tests',
  fullyParallel: true,
  retries: process.env.CI ? 2 : 0,
  reporter: 'html',
  use: {
    trace: 'on-first-retry',
  },
  projects: [
    { name: 'chromium', use: { ...devices['Desktop Chrome'] } },
  ],
})
"#;

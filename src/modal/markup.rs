// About window body. Static profile content; only the ids / classes the
// controller hooks into come from configuration.

use crate::config::ModalConfig;

const PROFILE_IMAGE: &str =
    "https://pbs.twimg.com/profile_images/1961017381423386625/9m6XriRP_400x400.jpg";

const ABOUT_CONTENT: &str = r#"<div class="window-content">
  <div class="profile-section">
    <img src="{image}" alt="Profile" class="profile-image">
    <div class="profile-info">
      <h3 class="haku-text">haku</h3>
      <p class="profile-subtitle">IoT (Embedded Systems) Dual Degree Student</p>
    </div>
  </div>
  <div class="about-content">
    <p>hi, i’m <strong>haku</strong>. right now i’m studying a b.tech + m.tech dual degree in iot, a 5-year course that mixes electronics, communication, and a bit of computer science.</p>
    <p>i’m also learning python and trying to connect the dots between coding and hardware. this site is part <em>portfolio</em>, part <em>personal blog</em>, a place where i put down projects i’m working on, ideas i’m exploring, and sometimes just random thoughts that i don’t want to lose.</p>
    <p>outside studies, you’ll most likely find me at the gym or playin games. i don’t claim to have everything figured out yet, but i’m learning, experimenting, and building as i go. this space is basically my way of sharing that journey.</p>
  </div>
</div>"#;

/// Inner HTML of the about window element.
pub fn about_window_html(cfg: &ModalConfig) -> String {
    let header = format!(
        r#"<div class="window-header" id="{header}">
  <span>about</span>
  <button class="{close_class}" id="{close}">[x]</button>
</div>
"#,
        header = cfg.header_id,
        close_class = cfg.close_class,
        close = cfg.close_id,
    );
    header + &ABOUT_CONTENT.replace("{image}", PROFILE_IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_carries_hook_ids() {
        let html = about_window_html(&ModalConfig::default());
        assert!(html.contains(r#"id="aboutWindowHeader""#));
        assert!(html.contains(r#"class="close-btn" id="aboutCloseBtn""#));
        assert!(html.contains(PROFILE_IMAGE));
        assert!(!html.contains("{image}"));
    }
}

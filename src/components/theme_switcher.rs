//! Theme picker listing every motif with its label and effect name.

use leptos::prelude::*;

use super::hero_background::ThemeName;

/// Row of buttons, one per theme. Clicking sets `theme`.
#[component]
pub fn ThemeSwitcher(
	/// Selected theme, shared with the background.
	theme: RwSignal<ThemeName>,
) -> impl IntoView {
	let buttons = ThemeName::ALL
		.into_iter()
		.map(|option| {
			let info = option.info();
			let swatch = format!("background: {};", option.palette().primary.to_css_rgb());
			view! {
				<button
					class="theme-option"
					class:active=move || theme.get() == option
					title=info.effect
					data-theme=option.id()
					on:click=move |_| theme.set(option)
				>
					<span class="theme-swatch" style=swatch></span>
					<span class="theme-label">{info.label}</span>
					<span class="theme-effect">{info.effect}</span>
				</button>
			}
		})
		.collect_view();

	view! {
		<nav class="theme-switcher" aria-label="Background theme">
			{buttons}
		</nav>
	}
}

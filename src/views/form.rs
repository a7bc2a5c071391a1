use std::fmt::Write;

use super::{escape, layout, Notice, Screen};
use crate::applications::dto::{ApplicationForm, HairType, OptionSet, Race, Size, OTHER};

fn text_input(out: &mut String, id: &str, label: &str, value: &str, placeholder: &str) {
    let _ = write!(
        out,
        r#"<div class="field"><label for="{id}">{label}</label><input id="{id}" name="{id}" value="{value}" placeholder="{placeholder}" required></div>"#,
        label = escape(label),
        value = escape(value),
        placeholder = escape(placeholder),
    );
}

fn select<T: OptionSet>(
    out: &mut String,
    id: &str,
    label: &str,
    prompt: &str,
    selected: &str,
    with_other: bool,
) {
    let _ = write!(
        out,
        r#"<div class="field"><label for="{id}">{label}</label><select id="{id}" name="{id}" required><option value="">{prompt}</option>"#,
        label = escape(label),
        prompt = escape(prompt),
    );
    let listed = T::ALL.iter().map(|o| (o.value(), o.label()));
    let other = with_other.then_some((OTHER, "Other"));
    for (value, text) in listed.chain(other) {
        let sel = if value == selected { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{value}"{sel}>{text}</option>"#);
    }
    out.push_str("</select>");
}

fn other_input(out: &mut String, id: &str, value: &str) {
    let _ = write!(
        out,
        r#"<input class="other" id="{id}" name="{id}" value="{value}" placeholder="If other, please specify..."></div>"#,
        value = escape(value),
    );
}

/// The public application form, pre-filled with `form`.
pub fn render_form(form: &ApplicationForm, notice: Option<&Notice>) -> String {
    let mut body = String::from(
        r#"<section class="card"><h2>Application Form</h2><p class="muted">Complete your application below</p>
<div class="warning"><strong>Just a heads up!</strong><p>Forms are reviewed every day. You will get a DM on Discord once yours has been looked at.</p></div>
<form method="post" action="/apply">"#,
    );

    text_input(&mut body, "discord_username", "Discord Username:", &form.discord_username, "");
    text_input(&mut body, "discord_id", "Discord ID:", &form.discord_id, "");
    text_input(&mut body, "name", "Your Name:", &form.name, "");
    let _ = write!(
        body,
        r#"<div class="field"><label for="age">How old are you?</label><input id="age" name="age" type="number" min="0" value="{}" required></div>"#,
        escape(&form.age)
    );

    select::<Size>(&mut body, "size", "How big is it?", "Select a size", &form.size, false);
    body.push_str("</div>");

    select::<Race>(&mut body, "race", "Race:", "Select your race", &form.race, true);
    other_input(&mut body, "race_other", &form.race_other);

    select::<HairType>(
        &mut body,
        "hair_type",
        "Hair Type:",
        "Select your hair type",
        &form.hair_type,
        true,
    );
    other_input(&mut body, "hair_type_other", &form.hair_type_other);

    let _ = write!(
        body,
        r#"<div class="field"><label for="why_esex">Why are you applying?</label><textarea id="why_esex" name="why_esex" placeholder="Tell me why..." required>{}</textarea></div>"#,
        escape(&form.why_esex)
    );

    text_input(&mut body, "height", "How tall are you?", &form.height, "e.g., 5'8\" or 173cm");
    text_input(&mut body, "weight", "What's your weight?", &form.weight, "e.g., 150 lbs or 68kg");

    body.push_str(r#"<button type="submit">Submit Application</button></form></section>"#);

    layout(Screen::Apply, "Application Form", notice, &body)
}

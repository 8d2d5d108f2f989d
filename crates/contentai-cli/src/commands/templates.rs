use contentai_core::template::Template;

pub fn list() {
    for template in Template::all() {
        println!("{:<16} {:<16} {}", template.id, template.label, template.description);
    }
}

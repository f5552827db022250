//! trybuild 编译期测试

#[test]
fn ui_bean_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/bean_ok.rs");
}

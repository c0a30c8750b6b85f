use rand::{seq::SliceRandom, Rng};
use shades_doc::{
  generate_documentation, BasicType, Dim, Documenter, FunctionType, NodeId, NodeKind, QualifiedType, Qualifier,
  Reference, Signature, StructMember, SyntaxTree, TreeBuilder, Type,
};

const HEADER: &str = "<b><u>shader.frag</u></b><br><br>";

fn vec3() -> BasicType {
  BasicType::Float(Dim::D3)
}

fn float() -> BasicType {
  BasicType::Float(Dim::Scalar)
}

fn doc(tree: &SyntaxTree, node: NodeId) -> Option<String> {
  generate_documentation(tree, node, None)
}

fn code(body: &str) -> String {
  format!("{}<code>{}</code>", HEADER, body)
}

fn name_of(tree: &SyntaxTree, node: NodeId) -> NodeId {
  tree.name_identifier(node).unwrap().0
}

struct Scene {
  tree: SyntaxTree,
  root: NodeId,
  light: NodeId,
  call: NodeId,
  arg: NodeId,
}

// struct Light { vec3 pos; float intensity; };
// Light(p, 1.0);
fn scene() -> Scene {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let light = builder
    .struct_definition(
      Some(root),
      "Light",
      vec![StructMember::new("pos", vec3()), StructMember::new("intensity", float())],
    )
    .unwrap();
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let call = builder.constructor_call(stmt, light).unwrap();
  let arg = builder.other(Some(call), "p").unwrap();
  builder.other(Some(call), "1.0").unwrap();

  Scene {
    tree: builder.build(),
    root,
    light,
    call,
    arg,
  }
}

#[test]
fn constructor_call_disambiguation() {
  let Scene {
    tree,
    light,
    call,
    arg,
    ..
  } = scene();
  let callee = name_of(&tree, tree.children(call)[0]);
  let expected = code("Light <b>Light</b>(vec3 <b>pos</b>, float <b>intensity</b>)");

  assert_eq!(generate_documentation(&tree, light, Some(callee)), Some(expected.clone()));
  assert_eq!(generate_documentation(&tree, light, Some(arg)), Some(expected.clone()));

  // the call itself
  assert_eq!(doc(&tree, call), Some(expected));
}

#[test]
fn structure_outside_of_calls() {
  let Scene {
    tree, root, light, call, ..
  } = scene();
  let expected = code("struct <b>Light</b>");

  assert_eq!(doc(&tree, light), Some(expected.clone()));
  assert_eq!(generate_documentation(&tree, light, Some(root)), Some(expected.clone()));

  // a call does not enclose itself
  assert_eq!(generate_documentation(&tree, light, Some(call)), Some(expected.clone()));

  // the name of the structure
  assert_eq!(doc(&tree, name_of(&tree, light)), Some(expected));
}

#[test]
fn constructor_type_name() {
  let Scene { tree, call, .. } = scene();
  let typename = tree.children(call)[0];
  let expected = code("struct <b>Light</b>");

  assert_eq!(doc(&tree, typename), Some(expected.clone()));
  assert_eq!(doc(&tree, name_of(&tree, typename)), Some(expected));
}

#[test]
fn members() {
  let Scene { tree, light, .. } = scene();
  let intensity = tree.children(tree.children(light)[2])[0];

  assert_eq!(doc(&tree, intensity), Some(code("float <b>intensity</b>")));
  assert_eq!(doc(&tree, name_of(&tree, intensity)), Some(code("float <b>intensity</b>")));
}

#[test]
fn variables() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let x = builder
    .variable_declaration(root, QualifiedType::unqualified(vec3()), &["x"])
    .unwrap()[0];
  let inputs = builder
    .variable_declaration(root, QualifiedType::new(vec3(), vec![Qualifier::In]), &["y", "z"])
    .unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, x), Some(code("vec3 <b>x</b>")));
  assert_eq!(doc(&tree, name_of(&tree, x)), Some(code("vec3 <b>x</b>")));
  assert_eq!(doc(&tree, inputs[0]), Some(code("in vec3 <b>y</b>")));
  assert_eq!(doc(&tree, name_of(&tree, inputs[1])), Some(code("in vec3 <b>z</b>")));

  // the declaration itself is not documented, only its declarators
  assert_eq!(doc(&tree, tree.parent(x).unwrap()), None);
}

#[test]
fn skipped_qualifiers() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let ty = QualifiedType::new(
    BasicType::Float(Dim::D4),
    vec![
      Qualifier::Layout("location = 0".to_owned()),
      Qualifier::from_keyword("subroutine"),
      Qualifier::Flat,
      Qualifier::Out,
    ],
  );
  let color = builder.variable_declaration(root, ty, &["color"]).unwrap()[0];
  let tree = builder.build();

  assert_eq!(doc(&tree, color), Some(code("flat out vec4 <b>color</b>")));
}

#[test]
fn unresolved_identifiers() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let var = builder.identifier(stmt, "x", Some(Reference::Variable(None))).unwrap();
  let ty = builder.identifier(stmt, "Light", Some(Reference::TypeName(None))).unwrap();
  let bare = builder.identifier(stmt, "y", None).unwrap();
  let builtin = builder.typename(stmt, "vec3", None).unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, var), None);
  assert_eq!(doc(&tree, ty), None);
  assert_eq!(doc(&tree, bare), None);
  assert_eq!(doc(&tree, builtin), None);
  assert_eq!(doc(&tree, name_of(&tree, builtin)), None);
  assert_eq!(doc(&tree, stmt), None);
}

#[test]
fn unknown_nodes() {
  let Scene { tree, .. } = scene();
  let mut other = TreeBuilder::new("other.frag");
  let mut last = other.other(None, "root").unwrap();

  for _ in 0..tree.len() {
    last = other.other(Some(last), "stmt").unwrap();
  }

  assert_eq!(doc(&tree, last), None);
}

#[test]
fn type_references() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let light = builder
    .struct_definition(Some(root), "Light", vec![StructMember::new("pos", vec3())])
    .unwrap();
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let sun = builder
    .identifier(stmt, "Sun", Some(Reference::TypeName(Some(light))))
    .unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, sun), Some(code("Light <b>Sun</b>")));
}

#[test]
fn type_reference_through_nested_identifiers() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let light = builder
    .struct_definition(Some(root), "Light", vec![StructMember::new("pos", vec3())])
    .unwrap();
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let outer = builder
    .identifier(stmt, "Outer", Some(Reference::TypeName(Some(light))))
    .unwrap();
  let mut inner = outer;

  for i in 0..64 {
    inner = builder.identifier(inner, format!("inner{}", i), None).unwrap();
  }

  let tree = builder.build();

  // the outermost identifier wins
  assert_eq!(doc(&tree, inner), Some(code("Light <b>Outer</b>")));
}

#[test]
fn field_selections() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let vec4 = Type::Basic(BasicType::Float(Dim::D4));
  builder
    .variable_declaration(root, QualifiedType::unqualified(vec4.clone()), &["v"])
    .unwrap();
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let rgb = builder.field_selection(stmt, &vec4, "rgb").unwrap();
  let bogus = builder.field_selection(stmt, &vec4, "rgx").unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, rgb), Some(code("vec3 <b>rgb</b>")));
  assert_eq!(doc(&tree, name_of(&tree, rgb)), Some(code("vec3 <b>rgb</b>")));
  assert_eq!(doc(&tree, bogus), None);
}

#[test]
fn field_selections_name_the_member_not_the_operand() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let vec4 = Type::Basic(BasicType::Float(Dim::D4));
  let v = builder
    .variable_declaration(root, QualifiedType::unqualified(vec4.clone()), &["v"])
    .unwrap()[0];
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let rgb = builder.field_selection(stmt, &vec4, "rgb").unwrap();
  builder
    .selection_operand(rgb, "v", Some(Reference::Variable(Some(v))))
    .unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, rgb), Some(code("vec3 <b>rgb</b>")));
}

#[test]
fn struct_field_selections() {
  let Scene { tree, light, .. } = scene();
  let light = tree.struct_definition(light).unwrap().struct_type().clone();
  let object = Type::from(QualifiedType::new(light, vec![Qualifier::Uniform]));

  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let selection = builder.field_selection(root, &object, "intensity").unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, selection), Some(code("float <b>intensity</b>")));
}

#[test]
fn functions() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let shade = builder
    .function_declaration(
      Some(root),
      "shade",
      BasicType::Float(Dim::D4),
      vec![
        (Some("normal"), QualifiedType::new(vec3(), vec![Qualifier::In])),
        (None, QualifiedType::unqualified(vec3())),
        (Some("t"), QualifiedType::unqualified(float())),
      ],
    )
    .unwrap();
  let tree = builder.build();
  let expected = code("vec4 <b>shade</b>(vec3 <b>normal</b>, vec3, float <b>t</b>)");

  assert_eq!(doc(&tree, shade), Some(expected.clone()));
  assert_eq!(doc(&tree, name_of(&tree, shade)), Some(expected));

  let normal = tree.children(tree.children(shade)[1])[0];
  assert_eq!(doc(&tree, normal), Some(code("in vec3 <b>normal</b>")));
  assert_eq!(doc(&tree, name_of(&tree, normal)), Some(code("in vec3 <b>normal</b>")));
}

#[test]
fn stray_parameter_declarations() {
  let mut builder = TreeBuilder::new("shader.frag");
  let f = builder
    .function_declaration(None, "f", vec3(), vec![(Some("a"), QualifiedType::unqualified(vec3()))])
    .unwrap();
  let stray = builder.push(Some(f), NodeKind::ParameterDeclaration).unwrap();
  builder
    .declarator(stray, "b", QualifiedType::unqualified(vec3()))
    .unwrap();
  let tree = builder.build();

  // names that do not line up with the function type are left out
  assert_eq!(doc(&tree, f), Some(code("vec3 <b>f</b>(vec3)")));
}

#[test]
fn declarators_owned_by_functions_and_structures() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let main = builder
    .function_declaration(Some(root), "main", BasicType::Void, Vec::new())
    .unwrap();
  let light = builder
    .struct_definition(Some(root), "Light", vec![StructMember::new("pos", vec3())])
    .unwrap();
  let main_decl = builder
    .declarator(main, "main", QualifiedType::unqualified(BasicType::Void))
    .unwrap();
  let light_decl = builder
    .declarator(light, "lights", QualifiedType::unqualified(vec3()))
    .unwrap();
  let tree = builder.build();

  assert_eq!(doc(&tree, main_decl), Some(code("void <b>main</b>()")));
  assert_eq!(doc(&tree, light_decl), Some(code("struct <b>Light</b>")));
}

#[test]
fn function_calls() {
  let mut builder = TreeBuilder::new("shader.frag");
  let root = builder.other(None, "translation unit").unwrap();
  let square = builder
    .function_declaration(
      Some(root),
      "square",
      float(),
      vec![(Some("x"), QualifiedType::unqualified(float()))],
    )
    .unwrap();
  let square_ty = builder
    .tree()
    .declaration(square)
    .map(|decl| match decl.kind() {
      shades_doc::DeclarationKind::Function(fun) => fun.function_type().clone(),
      _ => unreachable!(),
    })
    .unwrap();
  let stmt = builder.other(Some(root), "expression statement").unwrap();
  let user = builder.function_call(stmt, "square", Some(square_ty)).unwrap();
  let builtin = builder
    .function_call(
      stmt,
      "normalize",
      Some(FunctionType::new("normalize", vec3(), vec![vec3().into()])),
    )
    .unwrap();
  let unresolved = builder.function_call(stmt, "frobnicate", None).unwrap();
  let vector = builder.basic_constructor_call(stmt, vec3()).unwrap();
  let tree = builder.build();

  // names are unknown at call sites
  assert_eq!(doc(&tree, user), Some(code("float <b>square</b>(float)")));
  assert_eq!(doc(&tree, name_of(&tree, user)), Some(code("float <b>square</b>(float)")));
  assert_eq!(
    doc(&tree, builtin),
    Some("<u>internal</u><br><br><code>vec3 <b>normalize</b>(vec3)</code>".to_owned())
  );
  assert_eq!(doc(&tree, unresolved), None);
  assert_eq!(doc(&tree, name_of(&tree, unresolved)), None);
  assert_eq!(doc(&tree, vector), None);
}

#[test]
fn idempotence() {
  let Scene {
    tree,
    light,
    call,
    arg,
    ..
  } = scene();
  let documenter = Documenter::new(&tree);

  for node in tree.node_ids() {
    for &original in &[None, Some(arg), Some(call), Some(light)] {
      assert_eq!(documenter.generate(node, original), documenter.generate(node, original));
      assert_eq!(
        documenter.generate(node, original),
        generate_documentation(&tree, node, original)
      );
    }
  }
}

#[test]
fn random_constructors_list_every_member() {
  let mut rng = rand::thread_rng();

  for _ in 0..100 {
    let n = rng.gen_range(1..=8);
    let members: Vec<_> = (0..n)
      .map(|i| {
        let ty = *BasicType::ALL[1..].choose(&mut rng).unwrap();
        StructMember::new(format!("m{}", i), ty)
      })
      .collect();
    let params: Vec<_> = members
      .iter()
      .map(|member| format!("{} <b>{}</b>", member.ty(), member.name()))
      .collect();

    let mut builder = TreeBuilder::new("shader.frag");
    let root = builder.other(None, "translation unit").unwrap();
    let def = builder.struct_definition(Some(root), "S", members).unwrap();
    let call = builder.constructor_call(root, def).unwrap();
    let tree = builder.build();

    assert_eq!(
      tree.struct_definition(def).unwrap().constructor().parameter_types().len(),
      n
    );
    assert_eq!(
      doc(&tree, call),
      Some(code(&format!("S <b>S</b>({})", params.join(", "))))
    );
  }
}

#[test]
fn random_functions_list_every_parameter() {
  let mut rng = rand::thread_rng();

  for _ in 0..100 {
    let k = rng.gen_range(0..=6);
    let names: Vec<_> = (0..k).map(|i| format!("p{}", i)).collect();
    let types: Vec<_> = (0..k)
      .map(|_| *BasicType::ALL[1..].choose(&mut rng).unwrap())
      .collect();
    let params = names
      .iter()
      .zip(&types)
      .map(|(name, ty)| (Some(name.as_str()), QualifiedType::unqualified(*ty)))
      .collect();

    let mut builder = TreeBuilder::new("shader.frag");
    let fun = builder.function_declaration(None, "f", float(), params).unwrap();
    let tree = builder.build();

    let expected: Vec<_> = names
      .iter()
      .zip(&types)
      .map(|(name, ty)| format!("{} <b>{}</b>", ty, name))
      .collect();

    assert_eq!(
      doc(&tree, fun),
      Some(code(&format!("float <b>f</b>({})", expected.join(", "))))
    );
  }
}
